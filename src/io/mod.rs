mod reader;

pub use reader::{
    read_bytes, read_u16_be, read_u16_le, read_u24_le, read_u32_be, read_u32_le, read_u8,
    ByteOrder,
};

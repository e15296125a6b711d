// Adapters layer: workbook reader, export writers and filesystem storage.

pub mod loader;
pub mod sink;
pub mod storage;

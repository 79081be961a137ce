pub mod error;
pub mod image;
pub mod inject;

pub use error::{ErrorKind, InjectError};
pub use image::DiskImage;
pub use inject::{inject, inject_file, Injected};

pub const DEFAULT_IMAGE: &str = "cadence_disk.img";
/// First sector after the kernel, where applications are linked.
pub const APP_START_SECTOR: u32 = 50;
/// Sectors the kernel loads when launching an application.
pub const LOAD_WINDOW_SECTORS: u32 = 12;
/// 1.44 MB floppy.
pub const DEFAULT_IMAGE_SECTORS: u32 = 2880;

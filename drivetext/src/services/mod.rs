mod files;

pub use files::FileService;

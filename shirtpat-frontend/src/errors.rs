use std::path::PathBuf;

use thiserror::Error;

use shirtpat_engine::errors::PatternError;
use shirtpat_io::IoError;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("读取尺寸文件 {path:?} 失败: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析尺寸文件 {path:?} 失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("生成衣片失败: {0}")]
    Pattern(#[from] PatternError),
    #[error("导出图纸失败: {0}")]
    Export(#[from] IoError),
    #[error("写入归档 {path:?} 失败: {source}")]
    WriteArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

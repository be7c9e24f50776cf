use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use shirtpat_core::measurements::MeasurementRecord;

use crate::errors::FrontendError;

/// 尺寸数据来源，便于前端呈现加载信息。
#[derive(Debug, Clone)]
pub enum MeasurementSource {
    File(PathBuf),
    Sample,
}

/// 统一封装加载后的尺寸记录与元信息。
#[derive(Debug)]
pub struct LoadedMeasurements {
    pub record: MeasurementRecord,
    pub source: MeasurementSource,
}

/// 按优先级获取量体尺寸：命令行显式路径、环境变量
/// `SHIRTPAT_MEASUREMENTS_JSON` 指定的路径，最后回退到内置样例。
/// 读取或解析失败只在这个边界回退，生成器内部从不默认填充。
pub fn load_measurements(override_path: Option<&Path>) -> LoadedMeasurements {
    let candidate = override_path
        .map(Path::to_path_buf)
        .or_else(|| env::var_os("SHIRTPAT_MEASUREMENTS_JSON").map(PathBuf::from));

    if let Some(path) = candidate {
        match read_record(&path) {
            Ok(record) => {
                info!(path = %path.display(), "从 JSON 加载量体尺寸成功");
                let missing = record.missing_keys();
                if !missing.is_empty() {
                    let names: Vec<&str> = missing.iter().map(|key| key.as_str()).collect();
                    warn!(
                        missing = %names.join(", "),
                        "尺寸记录缺少部分键，依赖它们的衣片将生成失败"
                    );
                }
                return LoadedMeasurements {
                    record,
                    source: MeasurementSource::File(path),
                };
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "加载量体尺寸失败，回退到内置样例");
            }
        }
    }

    LoadedMeasurements {
        record: MeasurementRecord::sample(),
        source: MeasurementSource::Sample,
    }
}

fn read_record(path: &Path) -> Result<MeasurementRecord, FrontendError> {
    let content = fs::read_to_string(path).map_err(|source| FrontendError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| FrontendError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_path_wins() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, r#"{{"chest": 96.0, "neck_circumference": 38.0}}"#).unwrap();

        let loaded = load_measurements(Some(file.path()));
        assert!(matches!(loaded.source, MeasurementSource::File(_)));
        assert_eq!(loaded.record.chest, Some(96.0));
        assert!(loaded.record.waist.is_none());
    }

    #[test]
    fn unreadable_path_falls_back_to_sample() {
        let loaded = load_measurements(Some(Path::new("/nonexistent/measurements.json")));
        assert!(matches!(loaded.source, MeasurementSource::Sample));
        assert!(loaded.record.missing_keys().is_empty());
    }

    #[test]
    fn malformed_json_falls_back_to_sample() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "not json").unwrap();

        let loaded = load_measurements(Some(file.path()));
        assert!(matches!(loaded.source, MeasurementSource::Sample));
        assert_eq!(loaded.record.chest, Some(100.0));
    }
}

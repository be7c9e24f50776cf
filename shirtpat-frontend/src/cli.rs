use std::fs;
use std::path::Path;

use tracing::info;

use shirtpat_config::AppConfig;
use shirtpat_engine::builder;
use shirtpat_engine::offset::{DEFAULT_SEAM_ALLOWANCE, seam_offset};
use shirtpat_io::export_pattern_archive;

use crate::errors::FrontendError;
use crate::loader::{MeasurementSource, load_measurements};

/// CLI 生成流程：加载尺寸、生成整套衣片、打印概览并写出归档。
pub fn run_generate(
    config: &AppConfig,
    measurement_path: Option<&Path>,
) -> Result<(), FrontendError> {
    let loaded = load_measurements(measurement_path);
    match &loaded.source {
        MeasurementSource::File(path) => {
            println!("已从文件加载量体尺寸：{}", path.display());
        }
        MeasurementSource::Sample => {
            println!("未提供量体尺寸，使用内置样例记录。");
        }
    }

    let pieces = builder::build_all(&loaded.record)?;
    info!(piece_count = pieces.len(), "衣片生成完成");

    println!("生成的衣片：");
    for piece in &pieces {
        let outline = &piece.outline;
        println!("  - {}: {} 个锚点", piece.kind, outline.anchor_count());
        if let Some(bounds) = outline.bounds() {
            println!(
                "    范围 ({:.1}, {:.1}) ~ ({:.1}, {:.1})",
                bounds.min().x(),
                bounds.min().y(),
                bounds.max().x(),
                bounds.max().y()
            );
        }
        let seam = seam_offset(outline, DEFAULT_SEAM_ALLOWANCE);
        println!(
            "    缝份参考线 {} 个顶点（含闭合点），偏移 {:.1}cm",
            seam.len(),
            DEFAULT_SEAM_ALLOWANCE
        );
        for (index, point) in outline.labeled_points() {
            println!("    P{index} = ({:.2}, {:.2})", point.x(), point.y());
        }
    }

    let bytes = export_pattern_archive(&pieces)?;
    let archive_path = config.output.archive_path();
    if let Some(parent) = archive_path.parent() {
        fs::create_dir_all(parent).map_err(|source| FrontendError::WriteArchive {
            path: archive_path.clone(),
            source,
        })?;
    }
    fs::write(&archive_path, &bytes).map_err(|source| FrontendError::WriteArchive {
        path: archive_path.clone(),
        source,
    })?;

    info!(path = %archive_path.display(), size = bytes.len(), "归档写入完成");
    println!("归档已写入：{}", archive_path.display());
    Ok(())
}

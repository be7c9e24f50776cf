use std::fs;
use std::io::{self, Cursor, Write};
use std::path::Path;

use thiserror::Error;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use shirtpat_core::document::{Document, Entity};
use shirtpat_core::geometry::{Point2, Vector2};
use shirtpat_core::outline::PatternPiece;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to write file {path:?}: {source}")]
    WriteError {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode drawing stream: {0}")]
    Encode(#[from] std::io::Error),
    #[error("failed to assemble archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("invalid document structure: {0}")]
    InvalidDocument(String),
}

pub trait DocumentSaver {
    fn save(&self, document: &Document, path: &Path) -> Result<(), IoError>;
}

/// 图层与标注常量。下游排料/裁剪工具按这些固定值识别内容，
/// 改动会破坏兼容性。
const LAYER_OUTLINE: &str = "PATTERN_OUTLINE";
const LAYER_POINTS: &str = "POINTS";
const LAYER_TEXT: &str = "TEXT";
const COLOR_OUTLINE: i16 = 1;
const COLOR_POINTS: i16 = 5;
const COLOR_TEXT: i16 = 3;
const COLOR_ANNOTATION: i16 = 2;
const POINT_MARKER_RADIUS: f64 = 0.5;
const LABEL_HEIGHT: f64 = 0.8;
const TITLE_HEIGHT: f64 = 2.0;
const NOTE_HEIGHT: f64 = 1.0;
const LABEL_OFFSET: f64 = 0.6;
const ANNOTATION_MARGIN: f64 = 5.0;
const SEAM_NOTE: &str = "NOTE: ADD 1.5cm SEAM ALLOWANCE";

/// 把一块衣片展开成矢量图纸文档：闭合轮廓多段线、每个锚点的
/// 圆圈标记与 `P{i}` 编号，外加轮廓上方的标题和下方的缝份提示。
/// 多段线只走锚点，曲线控制点不进入图纸。
pub fn piece_document(piece: &PatternPiece) -> Document {
    let mut doc = Document::new();
    doc.ensure_layer(LAYER_OUTLINE, COLOR_OUTLINE);
    doc.ensure_layer(LAYER_POINTS, COLOR_POINTS);
    doc.ensure_layer(LAYER_TEXT, COLOR_TEXT);

    let outline = &piece.outline;
    doc.add_polyline(
        outline.anchors().iter().copied(),
        true,
        LAYER_OUTLINE,
        COLOR_OUTLINE,
    );

    let label_shift = Vector2::splat(LABEL_OFFSET);
    for (index, point) in outline.labeled_points() {
        doc.add_circle(point, POINT_MARKER_RADIUS, LAYER_POINTS, COLOR_POINTS);
        doc.add_text(
            point.translate(label_shift),
            format!("P{index}"),
            LABEL_HEIGHT,
            0.0,
            LAYER_TEXT,
            COLOR_TEXT,
        );
    }

    if let Some(bounds) = outline.bounds() {
        let anchor_x = outline.anchors()[0].x();
        doc.add_text(
            Point2::new(anchor_x, bounds.max().y() + ANNOTATION_MARGIN),
            piece.kind.title(),
            TITLE_HEIGHT,
            0.0,
            LAYER_TEXT,
            COLOR_ANNOTATION,
        );
        doc.add_text(
            Point2::new(anchor_x, bounds.min().y() - ANNOTATION_MARGIN),
            SEAM_NOTE,
            NOTE_HEIGHT,
            0.0,
            LAYER_TEXT,
            COLOR_ANNOTATION,
        );
    }
    doc
}

/// DXF R12 文本编码器。
pub struct DxfWriter;

impl DxfWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_dxf_string(&self, document: &Document) -> Result<String, IoError> {
        let mut buffer = Vec::new();
        write_document(&mut buffer, document)?;
        String::from_utf8(buffer).map_err(|err| IoError::InvalidDocument(err.to_string()))
    }
}

impl DocumentSaver for DxfWriter {
    fn save(&self, document: &Document, path: &Path) -> Result<(), IoError> {
        let data = self.to_dxf_string(document)?;
        fs::write(path, data).map_err(|source| IoError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn write_pair<W: Write>(writer: &mut W, code: i32, value: impl std::fmt::Display) -> io::Result<()> {
    writeln!(writer, "{code}")?;
    writeln!(writer, "{value}")
}

fn write_document<W: Write>(writer: &mut W, document: &Document) -> io::Result<()> {
    // HEADER：R12（AC1009），绘图单位为厘米（$INSUNITS = 5）。
    write_pair(writer, 0, "SECTION")?;
    write_pair(writer, 2, "HEADER")?;
    write_pair(writer, 9, "$ACADVER")?;
    write_pair(writer, 1, "AC1009")?;
    write_pair(writer, 9, "$INSUNITS")?;
    write_pair(writer, 70, 5)?;
    write_pair(writer, 0, "ENDSEC")?;

    write_tables(writer, document)?;

    write_pair(writer, 0, "SECTION")?;
    write_pair(writer, 2, "ENTITIES")?;
    for (_, entity) in document.entities() {
        match entity {
            Entity::Polyline(polyline) => {
                write_pair(writer, 0, "LWPOLYLINE")?;
                write_pair(writer, 8, &polyline.layer)?;
                write_pair(writer, 62, polyline.color)?;
                write_pair(writer, 90, polyline.vertices.len())?;
                write_pair(writer, 70, if polyline.is_closed { 1 } else { 0 })?;
                for vertex in &polyline.vertices {
                    write_pair(writer, 10, vertex.x())?;
                    write_pair(writer, 20, vertex.y())?;
                }
            }
            Entity::Circle(circle) => {
                write_pair(writer, 0, "CIRCLE")?;
                write_pair(writer, 8, &circle.layer)?;
                write_pair(writer, 62, circle.color)?;
                write_pair(writer, 10, circle.center.x())?;
                write_pair(writer, 20, circle.center.y())?;
                write_pair(writer, 40, circle.radius)?;
            }
            Entity::Text(text) => {
                write_pair(writer, 0, "TEXT")?;
                write_pair(writer, 8, &text.layer)?;
                write_pair(writer, 62, text.color)?;
                write_pair(writer, 10, text.insert.x())?;
                write_pair(writer, 20, text.insert.y())?;
                write_pair(writer, 40, text.height)?;
                write_pair(writer, 50, text.rotation)?;
                write_pair(writer, 1, &text.content)?;
            }
        }
    }
    write_pair(writer, 0, "ENDSEC")?;
    write_pair(writer, 0, "EOF")
}

fn write_tables<W: Write>(writer: &mut W, document: &Document) -> io::Result<()> {
    // 图层表按名称排序，保证同一文档两次导出逐字节一致。
    let mut layers: Vec<_> = document.layers().collect();
    layers.sort_by(|a, b| a.name.cmp(&b.name));

    write_pair(writer, 0, "SECTION")?;
    write_pair(writer, 2, "TABLES")?;

    write_pair(writer, 0, "TABLE")?;
    write_pair(writer, 2, "LTYPE")?;
    write_pair(writer, 70, 1)?;
    write_pair(writer, 0, "LTYPE")?;
    write_pair(writer, 2, "CONTINUOUS")?;
    write_pair(writer, 70, 0)?;
    write_pair(writer, 3, "Solid line")?;
    write_pair(writer, 72, 65)?;
    write_pair(writer, 73, 0)?;
    write_pair(writer, 40, 0.0)?;
    write_pair(writer, 0, "ENDTAB")?;

    write_pair(writer, 0, "TABLE")?;
    write_pair(writer, 2, "LAYER")?;
    write_pair(writer, 70, layers.len())?;
    for layer in layers {
        write_pair(writer, 0, "LAYER")?;
        write_pair(writer, 2, &layer.name)?;
        write_pair(writer, 70, 0)?;
        // ACI 颜色为负表示图层关闭。
        let color = if layer.is_visible {
            layer.color
        } else {
            -layer.color
        };
        write_pair(writer, 62, color)?;
        write_pair(writer, 6, "CONTINUOUS")?;
    }
    write_pair(writer, 0, "ENDTAB")?;
    write_pair(writer, 0, "ENDSEC")
}

/// 把整套衣片打包为 ZIP 归档，条目名固定为 `{file_stem}.dxf`。
/// 任何一片编码失败则整次导出失败，不产出部分归档。
pub fn export_pattern_archive(pieces: &[PatternPiece]) -> Result<Vec<u8>, IoError> {
    let writer = DxfWriter::new();
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for piece in pieces {
        let document = piece_document(piece);
        let data = writer.to_dxf_string(&document)?;
        archive.start_file(format!("{}.dxf", piece.kind.file_stem()), options)?;
        archive.write_all(data.as_bytes())?;
    }
    let cursor = archive.finish()?;
    Ok(cursor.into_inner())
}

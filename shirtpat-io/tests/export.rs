use std::io::Cursor;

use shirtpat_core::document::Entity;
use shirtpat_core::measurements::MeasurementRecord;
use shirtpat_core::outline::{PatternPiece, PieceKind};
use shirtpat_engine::builder;
use shirtpat_io::{DocumentSaver, DxfWriter, export_pattern_archive, piece_document};

fn front_piece() -> PatternPiece {
    let record = MeasurementRecord::sample();
    let outline = builder::front_panel(&record).expect("front panel outline");
    PatternPiece::new(PieceKind::FrontPanel, outline)
}

#[test]
fn front_panel_document_structure() {
    let doc = piece_document(&front_piece());

    let mut polylines = 0;
    let mut circles = 0;
    let mut texts = 0;
    for (_, entity) in doc.entities() {
        match entity {
            Entity::Polyline(polyline) => {
                polylines += 1;
                assert!(polyline.is_closed);
                assert_eq!(polyline.vertices.len(), 8);
                assert_eq!(polyline.layer, "PATTERN_OUTLINE");
            }
            Entity::Circle(circle) => {
                circles += 1;
                assert_eq!(circle.radius, 0.5);
                assert_eq!(circle.layer, "POINTS");
            }
            Entity::Text(_) => texts += 1,
        }
    }
    // 一条轮廓线、8 个点标记、8 个编号、标题与缝份提示。
    assert_eq!(polylines, 1);
    assert_eq!(circles, 8);
    assert_eq!(texts, 10);
    assert_eq!(doc.entities().count(), 19);

    assert_eq!(doc.layer("PATTERN_OUTLINE").map(|layer| layer.color), Some(1));
    assert_eq!(doc.layer("POINTS").map(|layer| layer.color), Some(5));
    assert_eq!(doc.layer("TEXT").map(|layer| layer.color), Some(3));
}

#[test]
fn annotations_sit_outside_outline() {
    let piece = front_piece();
    let doc = piece_document(&piece);
    let bounds = piece.outline.bounds().expect("outline bounds");

    let mut saw_title = false;
    let mut saw_note = false;
    for (_, entity) in doc.entities() {
        if let Entity::Text(text) = entity {
            match text.content.as_str() {
                "FRONT_PANEL PATTERN" => {
                    saw_title = true;
                    assert_eq!(text.height, 2.0);
                    assert_eq!(text.color, 2);
                    assert_eq!(text.insert.y(), bounds.max().y() + 5.0);
                }
                "NOTE: ADD 1.5cm SEAM ALLOWANCE" => {
                    saw_note = true;
                    assert_eq!(text.height, 1.0);
                    assert_eq!(text.insert.y(), bounds.min().y() - 5.0);
                }
                _ => {}
            }
        }
    }
    assert!(saw_title);
    assert!(saw_note);
}

#[test]
fn dxf_output_is_r12_with_expected_entities() {
    let doc = piece_document(&front_piece());
    let dxf = DxfWriter::new().to_dxf_string(&doc).expect("encode dxf");

    assert!(dxf.starts_with("0\nSECTION\n2\nHEADER\n"));
    assert!(dxf.contains("$ACADVER\n1\nAC1009"));
    // $INSUNITS = 5，厘米。
    assert!(dxf.contains("$INSUNITS\n70\n5"));
    assert!(dxf.contains("LWPOLYLINE"));
    assert!(dxf.contains("CIRCLE"));
    assert!(dxf.contains("1\nP0\n"));
    assert!(dxf.contains("1\nP7\n"));
    assert!(dxf.contains("FRONT_PANEL PATTERN"));
    assert!(dxf.contains("NOTE: ADD 1.5cm SEAM ALLOWANCE"));
    assert!(dxf.ends_with("0\nEOF\n"));
}

#[test]
fn dxf_output_is_deterministic() {
    let doc = piece_document(&front_piece());
    let writer = DxfWriter::new();
    let first = writer.to_dxf_string(&doc).expect("encode dxf");
    let second = writer.to_dxf_string(&doc).expect("encode dxf");
    assert_eq!(first, second);
}

#[test]
fn saver_writes_file_to_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("front_panel.dxf");
    let doc = piece_document(&front_piece());
    DxfWriter::new().save(&doc, &path).expect("save dxf");

    let data = std::fs::read_to_string(&path).expect("read back");
    assert!(data.contains("AC1009"));
}

#[test]
fn archive_contains_one_entry_per_piece() {
    let record = MeasurementRecord::sample();
    let pieces = builder::build_all(&record).expect("full set");
    let bytes = export_pattern_archive(&pieces).expect("archive");

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("open archive");
    assert_eq!(archive.len(), 5);
    let expected = [
        "front_panel.dxf",
        "back_panel.dxf",
        "sleeve.dxf",
        "collar.dxf",
        "cuff.dxf",
    ];
    for (index, name) in expected.iter().enumerate() {
        let file = archive.by_index(index).expect("entry");
        assert_eq!(file.name(), *name);
    }
}

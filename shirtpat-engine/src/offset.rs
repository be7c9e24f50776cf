use shirtpat_core::geometry::{Point2, Vector2};
use shirtpat_core::outline::Outline;

/// 默认缝份宽度（厘米）。
pub const DEFAULT_SEAM_ALLOWANCE: f64 = 1.5;

/// 计算缝份参考线顶点：每个锚点在 x、y 两个方向各平移 `margin`，
/// 末尾再追加一个由首锚点独立平移得到的闭合点，使参考线自身闭合。
///
/// 这是逐轴的简化偏移，并非几何意义上的法向平行线；下游排料工具
/// 依赖这一确定公式，不要改成真正的轮廓偏移算法。
pub fn seam_offset(outline: &Outline, margin: f64) -> Vec<Point2> {
    let shift = Vector2::splat(margin);
    let mut points: Vec<Point2> = outline
        .anchors()
        .iter()
        .map(|anchor| anchor.translate(shift))
        .collect();
    if let Some(first) = outline.anchors().first() {
        points.push(first.translate(Vector2::splat(margin)));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use shirtpat_core::outline::Segment;

    fn square() -> Outline {
        Outline::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
                Point2::new(0.0, 10.0),
            ],
            vec![Segment::Line, Segment::Line, Segment::Line, Segment::Close],
        )
    }

    #[test]
    fn every_anchor_is_shifted_on_both_axes() {
        let outline = square();
        let points = seam_offset(&outline, DEFAULT_SEAM_ALLOWANCE);
        assert_eq!(points.len(), outline.anchor_count() + 1);
        for (anchor, shifted) in outline.anchors().iter().zip(&points) {
            assert_eq!(shifted.x(), anchor.x() + DEFAULT_SEAM_ALLOWANCE);
            assert_eq!(shifted.y(), anchor.y() + DEFAULT_SEAM_ALLOWANCE);
        }
    }

    #[test]
    fn closing_point_matches_shifted_first_anchor() {
        let outline = square();
        let points = seam_offset(&outline, 2.0);
        let first = points.first().expect("offset points");
        let last = points.last().expect("offset points");
        assert_eq!(first, last);
        assert_eq!(last.x(), 2.0);
        assert_eq!(last.y(), 2.0);
    }

    #[test]
    fn zero_margin_reproduces_anchors() {
        let outline = square();
        let points = seam_offset(&outline, 0.0);
        assert_eq!(&points[..outline.anchor_count()], outline.anchors());
    }
}

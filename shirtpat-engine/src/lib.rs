pub mod offset;

pub mod errors {
    use shirtpat_core::measurements::MeasurementKey;
    use thiserror::Error;

    /// 生成阶段的输入错误。生成器从不静默替换缺失值，
    /// 回退到样例尺寸只允许发生在采集边界。
    #[derive(Debug, Clone, PartialEq, Error)]
    pub enum PatternError {
        #[error("missing required measurement: {0}")]
        MissingMeasurement(MeasurementKey),
        #[error("measurement {key} must be positive, got {value}")]
        NonPositiveMeasurement { key: MeasurementKey, value: f64 },
    }
}

pub mod builder {
    use tracing::debug;

    use shirtpat_core::geometry::Point2;
    use shirtpat_core::measurements::{MeasurementKey, MeasurementRecord};
    use shirtpat_core::outline::{Outline, PatternPiece, PieceKind, Segment};

    use crate::errors::PatternError;

    /// 领片的固定宽度（厘米）。
    const COLLAR_WIDTH: f64 = 5.0;
    /// 袖口片的固定宽度（厘米）。
    const CUFF_WIDTH: f64 = 6.0;

    /// 腰线锚点在衣长方向上的固定比例，不依赖单独的腰高尺寸。
    const WAIST_RATIO: f64 = 0.4;

    fn require(record: &MeasurementRecord, key: MeasurementKey) -> Result<f64, PatternError> {
        let value = record
            .get(key)
            .ok_or(PatternError::MissingMeasurement(key))?;
        if value <= 0.0 {
            return Err(PatternError::NonPositiveMeasurement { key, value });
        }
        Ok(value)
    }

    /// 按衣片种类分派到对应生成函数。纯函数：同一输入必然产出
    /// 逐位一致的轮廓。
    pub fn build(kind: PieceKind, record: &MeasurementRecord) -> Result<Outline, PatternError> {
        match kind {
            PieceKind::FrontPanel => front_panel(record),
            PieceKind::BackPanel => back_panel(record),
            PieceKind::Sleeve => sleeve(record),
            PieceKind::Collar => collar(record),
            PieceKind::Cuff => cuff(record),
        }
    }

    /// 按固定顺序生成整套五片。任何一片失败则整次请求失败，
    /// 不产出部分结果。
    pub fn build_all(record: &MeasurementRecord) -> Result<Vec<PatternPiece>, PatternError> {
        PieceKind::ALL
            .iter()
            .map(|kind| Ok(PatternPiece::new(*kind, build(*kind, record)?)))
            .collect()
    }

    /// 前片：半胸围加 5cm 放松量，领口深 颈围/12 + 2。
    pub fn front_panel(record: &MeasurementRecord) -> Result<Outline, PatternError> {
        let chest = require(record, MeasurementKey::Chest)? / 2.0 + 5.0;
        let shoulder = require(record, MeasurementKey::ShoulderWidth)? / 2.0;
        let length = require(record, MeasurementKey::BackLength)?;
        let neck = require(record, MeasurementKey::NeckCircumference)?;
        let neck_width = neck / 6.0;
        let neck_depth = neck / 12.0 + 2.0;
        let armhole = require(record, MeasurementKey::ArmholeDepth)?;
        // 腰围派生值参与校验与日志，但当前轮廓不含收腰省道。
        let waist = require(record, MeasurementKey::Waist)? / 2.0 + 3.0;
        let hem = require(record, MeasurementKey::HemWidth)? / 2.0;
        debug!(
            chest,
            shoulder, length, neck_width, neck_depth, armhole, waist, hem, "前片派生尺寸"
        );
        Ok(bodice(
            chest, shoulder, length, neck_width, neck_depth, armhole, hem,
        ))
    }

    /// 后片：放松量比前片少 2cm，领口更浅（颈围/24）。
    pub fn back_panel(record: &MeasurementRecord) -> Result<Outline, PatternError> {
        let chest = require(record, MeasurementKey::Chest)? / 2.0 + 3.0;
        let shoulder = require(record, MeasurementKey::ShoulderWidth)? / 2.0;
        let length = require(record, MeasurementKey::BackLength)?;
        let neck = require(record, MeasurementKey::NeckCircumference)?;
        let neck_width = neck / 6.0;
        let neck_depth = neck / 24.0;
        let armhole = require(record, MeasurementKey::ArmholeDepth)?;
        let waist = require(record, MeasurementKey::Waist)? / 2.0 + 2.0;
        let hem = require(record, MeasurementKey::HemWidth)? / 2.0;
        debug!(
            chest,
            shoulder, length, neck_width, neck_depth, armhole, waist, hem, "后片派生尺寸"
        );
        Ok(bodice(
            chest, shoulder, length, neck_width, neck_depth, armhole, hem,
        ))
    }

    /// 前后片共用的大身轮廓：8 个锚点，坐标原点在肩点，
    /// y 轴向下（与图纸排版一致）。最后一段是回到原点的
    /// 领口二次曲线，控制点取 (0, neck_depth) 把曲线拉向前中线。
    fn bodice(
        chest: f64,
        shoulder: f64,
        length: f64,
        neck_width: f64,
        neck_depth: f64,
        armhole: f64,
        hem: f64,
    ) -> Outline {
        let anchors = vec![
            Point2::new(0.0, 0.0),                         // 0: 肩点（原点）
            Point2::new(shoulder, 0.0),                    // 1: 肩线外端
            Point2::new(chest, armhole),                   // 2: 袖窿底
            Point2::new(chest, length * WAIST_RATIO),      // 3: 腰线
            Point2::new(hem / 2.0 + chest / 2.0, length),  // 4: 下摆外角
            Point2::new(0.0, length),                      // 5: 下摆内角
            Point2::new(0.0, armhole),                     // 6: 前中袖窿高度
            Point2::new(neck_width, neck_depth),           // 7: 领口点
        ];
        let mut segments = vec![Segment::Line; 7];
        segments.push(Segment::Quadratic {
            control: Point2::new(0.0, neck_depth),
        });
        Outline::new(anchors, segments)
    }

    /// 袖片：5 个锚点，袖山由两段三次曲线构成对称的拱顶，
    /// 左右控制点关于过顶点的竖直轴镜像（x 取反、y 相同）。
    pub fn sleeve(record: &MeasurementRecord) -> Result<Outline, PatternError> {
        let sleeve_length = require(record, MeasurementKey::SleeveLength)?;
        // 袖窿深 × 2 作为袖窿周长的近似量。
        let armhole = require(record, MeasurementKey::ArmholeDepth)? * 2.0;
        let cuff_width = require(record, MeasurementKey::CuffCircumference)? + 2.0;
        let cap_height = armhole / 3.0;
        let sleeve_width = armhole / 2.0 + 5.0;
        debug!(
            sleeve_length,
            armhole, cap_height, sleeve_width, cuff_width, "袖片派生尺寸"
        );

        let anchors = vec![
            Point2::new(0.0, 0.0),                              // 0: 袖山顶点
            Point2::new(sleeve_width / 2.0, cap_height),        // 1: 右腋下点
            Point2::new(sleeve_width / 3.0, sleeve_length),     // 2: 右袖口角
            Point2::new(-sleeve_width / 3.0, sleeve_length),    // 3: 左袖口角
            Point2::new(-sleeve_width / 2.0, cap_height),       // 4: 左腋下点
        ];
        let segments = vec![
            Segment::Cubic {
                control1: Point2::new(sleeve_width / 4.0, cap_height / 3.0),
                control2: Point2::new(sleeve_width / 2.0, cap_height / 1.5),
            },
            Segment::Line,
            Segment::Line,
            Segment::Line,
            Segment::Cubic {
                control1: Point2::new(-sleeve_width / 2.0, cap_height / 1.5),
                control2: Point2::new(-sleeve_width / 4.0, cap_height / 3.0),
            },
        ];
        Ok(Outline::new(anchors, segments))
    }

    /// 领片：颈围加 2cm 放松量 × 固定宽 5cm 的矩形。
    pub fn collar(record: &MeasurementRecord) -> Result<Outline, PatternError> {
        let neck = require(record, MeasurementKey::NeckCircumference)?;
        let collar_length = neck + 2.0;
        debug!(collar_length, width = COLLAR_WIDTH, "领片派生尺寸");
        Ok(rectangle(collar_length, COLLAR_WIDTH))
    }

    /// 袖口片：腕围加 2cm 放松量 × 固定宽 6cm 的矩形。
    pub fn cuff(record: &MeasurementRecord) -> Result<Outline, PatternError> {
        let cuff_circumference = require(record, MeasurementKey::CuffCircumference)?;
        let cuff_length = cuff_circumference + 2.0;
        debug!(cuff_length, width = CUFF_WIDTH, "袖口片派生尺寸");
        Ok(rectangle(cuff_length, CUFF_WIDTH))
    }

    fn rectangle(length: f64, width: f64) -> Outline {
        Outline::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(length, 0.0),
                Point2::new(length, width),
                Point2::new(0.0, width),
            ],
            vec![Segment::Line, Segment::Line, Segment::Line, Segment::Close],
        )
    }

}

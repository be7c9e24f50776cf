pub mod geometry {
    use glam::DVec2;
    use serde::{Deserialize, Serialize};

    /// 二维点，内部以 `glam::DVec2` 表示；纸样坐标以厘米为单位。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point2(pub DVec2);

    impl Point2 {
        #[inline]
        pub fn new(x: f64, y: f64) -> Self {
            Self(DVec2::new(x, y))
        }

        #[inline]
        pub fn from_vec(vec: DVec2) -> Self {
            Self(vec)
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn translate(self, offset: Vector2) -> Self {
            Self(self.0 + offset.0)
        }

        #[inline]
        pub fn as_vec2(self) -> DVec2 {
            self.0
        }
    }

    impl From<DVec2> for Point2 {
        fn from(value: DVec2) -> Self {
            Self::from_vec(value)
        }
    }

    /// 二维向量，目前主要用于缝份位移。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Vector2(pub DVec2);

    impl Vector2 {
        #[inline]
        pub fn new(x: f64, y: f64) -> Self {
            Self(DVec2::new(x, y))
        }

        /// 两个分量相同的向量，等距偏移时常用。
        #[inline]
        pub fn splat(value: f64) -> Self {
            Self(DVec2::splat(value))
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn as_vec2(self) -> DVec2 {
            self.0
        }
    }

    impl From<DVec2> for Vector2 {
        fn from(value: DVec2) -> Self {
            Self(value)
        }
    }

    /// 轴对齐边界框，用于估算衣片/图纸范围。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Bounds2D {
        min: Point2,
        max: Point2,
    }

    impl Bounds2D {
        #[inline]
        pub fn new(min: Point2, max: Point2) -> Self {
            Self { min, max }
        }

        #[inline]
        pub fn empty() -> Self {
            Self {
                min: Point2::new(f64::INFINITY, f64::INFINITY),
                max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            }
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.min.x() > self.max.x() || self.min.y() > self.max.y()
        }

        #[inline]
        pub fn min(&self) -> Point2 {
            self.min
        }

        #[inline]
        pub fn max(&self) -> Point2 {
            self.max
        }

        pub fn include_point(&mut self, point: Point2) {
            if self.is_empty() {
                self.min = point;
                self.max = point;
                return;
            }
            let min_vec = self.min.as_vec2().min(point.as_vec2());
            let max_vec = self.max.as_vec2().max(point.as_vec2());
            self.min = Point2::from_vec(min_vec);
            self.max = Point2::from_vec(max_vec);
        }

        pub fn include_bounds(&mut self, other: &Bounds2D) {
            if other.is_empty() {
                return;
            }
            self.include_point(other.min);
            self.include_point(other.max);
        }

        #[inline]
        pub fn center(&self) -> Point2 {
            debug_assert!(!self.is_empty());
            let center = (self.min.as_vec2() + self.max.as_vec2()) * 0.5;
            Point2::from_vec(center)
        }
    }
}

pub mod measurements {
    use std::fmt;

    use serde::{Deserialize, Serialize};

    /// 九项必需量体尺寸的键，用于按键取值与错误报告。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum MeasurementKey {
        Chest,
        Waist,
        ShoulderWidth,
        BackLength,
        SleeveLength,
        NeckCircumference,
        ArmholeDepth,
        CuffCircumference,
        HemWidth,
    }

    impl MeasurementKey {
        pub const ALL: [MeasurementKey; 9] = [
            MeasurementKey::Chest,
            MeasurementKey::Waist,
            MeasurementKey::ShoulderWidth,
            MeasurementKey::BackLength,
            MeasurementKey::SleeveLength,
            MeasurementKey::NeckCircumference,
            MeasurementKey::ArmholeDepth,
            MeasurementKey::CuffCircumference,
            MeasurementKey::HemWidth,
        ];

        /// JSON 中使用的键名。
        #[inline]
        pub fn as_str(self) -> &'static str {
            match self {
                MeasurementKey::Chest => "chest",
                MeasurementKey::Waist => "waist",
                MeasurementKey::ShoulderWidth => "shoulder_width",
                MeasurementKey::BackLength => "back_length",
                MeasurementKey::SleeveLength => "sleeve_length",
                MeasurementKey::NeckCircumference => "neck_circumference",
                MeasurementKey::ArmholeDepth => "armhole_depth",
                MeasurementKey::CuffCircumference => "cuff_circumference",
                MeasurementKey::HemWidth => "hem_width",
            }
        }
    }

    impl fmt::Display for MeasurementKey {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// 量体尺寸记录，全部以厘米计。字段缺失表示输入未提供该键；
    /// 是否回退到内置样例由采集边界决定，生成器本身从不默认填充。
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct MeasurementRecord {
        pub chest: Option<f64>,
        pub waist: Option<f64>,
        pub shoulder_width: Option<f64>,
        pub back_length: Option<f64>,
        pub sleeve_length: Option<f64>,
        pub neck_circumference: Option<f64>,
        pub armhole_depth: Option<f64>,
        pub cuff_circumference: Option<f64>,
        pub hem_width: Option<f64>,
    }

    impl MeasurementRecord {
        #[inline]
        pub fn get(&self, key: MeasurementKey) -> Option<f64> {
            match key {
                MeasurementKey::Chest => self.chest,
                MeasurementKey::Waist => self.waist,
                MeasurementKey::ShoulderWidth => self.shoulder_width,
                MeasurementKey::BackLength => self.back_length,
                MeasurementKey::SleeveLength => self.sleeve_length,
                MeasurementKey::NeckCircumference => self.neck_circumference,
                MeasurementKey::ArmholeDepth => self.armhole_depth,
                MeasurementKey::CuffCircumference => self.cuff_circumference,
                MeasurementKey::HemWidth => self.hem_width,
            }
        }

        /// 内置样例尺寸，供采集边界在无输入时回退使用。
        pub fn sample() -> Self {
            Self {
                chest: Some(100.0),
                waist: Some(90.0),
                shoulder_width: Some(46.0),
                back_length: Some(75.0),
                sleeve_length: Some(60.0),
                neck_circumference: Some(40.0),
                armhole_depth: Some(25.0),
                cuff_circumference: Some(20.0),
                hem_width: Some(110.0),
            }
        }

        /// 列出尚未提供的键，便于边界层提示用户。
        pub fn missing_keys(&self) -> Vec<MeasurementKey> {
            MeasurementKey::ALL
                .into_iter()
                .filter(|key| self.get(*key).is_none())
                .collect()
        }
    }
}

pub mod outline {
    use std::fmt;

    use serde::{Deserialize, Serialize};

    use crate::geometry::{Bounds2D, Point2};

    /// 连接相邻锚点的路径指令。曲线控制点只参与绘制，
    /// 不进入带编号的锚点序列。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub enum Segment {
        Line,
        Quadratic { control: Point2 },
        Cubic { control1: Point2, control2: Point2 },
        Close,
    }

    /// 闭合轮廓：`anchors[i]` 经 `segments[i]` 连向 `anchors[(i + 1) % n]`，
    /// 因此指令序列的最后一项就是回到起点的闭合段。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Outline {
        anchors: Vec<Point2>,
        segments: Vec<Segment>,
    }

    impl Outline {
        pub fn new(anchors: Vec<Point2>, segments: Vec<Segment>) -> Self {
            debug_assert_eq!(anchors.len(), segments.len());
            Self { anchors, segments }
        }

        #[inline]
        pub fn anchors(&self) -> &[Point2] {
            &self.anchors
        }

        #[inline]
        pub fn segments(&self) -> &[Segment] {
            &self.segments
        }

        #[inline]
        pub fn anchor_count(&self) -> usize {
            self.anchors.len()
        }

        /// 带编号的锚点序列（0..n-1），即装配参考点集。
        #[inline]
        pub fn labeled_points(&self) -> impl Iterator<Item = (usize, Point2)> + '_ {
            self.anchors.iter().copied().enumerate()
        }

        /// 仅由锚点决定的包围盒；控制点不参与范围估算。
        pub fn bounds(&self) -> Option<Bounds2D> {
            if self.anchors.is_empty() {
                return None;
            }
            let mut bounds = Bounds2D::empty();
            for anchor in &self.anchors {
                bounds.include_point(*anchor);
            }
            Some(bounds)
        }

        #[inline]
        pub fn is_well_formed(&self) -> bool {
            self.anchors.len() >= 3 && self.anchors.len() == self.segments.len()
        }
    }

    /// 衣片种类，同时决定导出文件名与图纸标题。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PieceKind {
        FrontPanel,
        BackPanel,
        Sleeve,
        Collar,
        Cuff,
    }

    impl PieceKind {
        /// 固定的导出顺序，保证归档内容可复现。
        pub const ALL: [PieceKind; 5] = [
            PieceKind::FrontPanel,
            PieceKind::BackPanel,
            PieceKind::Sleeve,
            PieceKind::Collar,
            PieceKind::Cuff,
        ];

        #[inline]
        pub fn file_stem(self) -> &'static str {
            match self {
                PieceKind::FrontPanel => "front_panel",
                PieceKind::BackPanel => "back_panel",
                PieceKind::Sleeve => "sleeve",
                PieceKind::Collar => "collar",
                PieceKind::Cuff => "cuff",
            }
        }

        /// 图纸标题，如 `FRONT_PANEL PATTERN`。
        pub fn title(self) -> String {
            format!("{} PATTERN", self.file_stem().to_uppercase())
        }
    }

    impl fmt::Display for PieceKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.file_stem())
        }
    }

    /// 一块生成完毕的衣片。创建后不再修改；每次生成请求都整套重算，
    /// 请求之间不保留任何状态。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PatternPiece {
        pub kind: PieceKind,
        pub outline: Outline,
    }

    impl PatternPiece {
        pub fn new(kind: PieceKind, outline: Outline) -> Self {
            Self { kind, outline }
        }
    }
}

pub mod document {
    use std::collections::HashMap;

    use serde::{Deserialize, Serialize};

    use crate::geometry::{Bounds2D, Point2};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EntityId(u64);

    impl EntityId {
        #[inline]
        pub fn new(raw: u64) -> Self {
            Self(raw)
        }

        /// 提供原始数值，便于日志输出。
        #[inline]
        pub fn get(self) -> u64 {
            self.0
        }
    }

    /// 图层：名称、ACI 颜色索引与可见性。颜色同时写入 DXF 图层表。
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Layer {
        pub name: String,
        pub color: i16,
        pub is_visible: bool,
    }

    impl Layer {
        #[inline]
        pub fn new(name: impl Into<String>, color: i16) -> Self {
            Self {
                name: name.into(),
                color,
                is_visible: true,
            }
        }
    }

    /// 图纸只需要三种实体：轮廓多段线、参考点圆圈与文字标注。
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub enum Entity {
        Polyline(Polyline),
        Circle(Circle),
        Text(Text),
    }

    impl Entity {
        #[inline]
        pub fn layer_name(&self) -> &str {
            match self {
                Entity::Polyline(polyline) => &polyline.layer,
                Entity::Circle(circle) => &circle.layer,
                Entity::Text(text) => &text.layer,
            }
        }

        #[inline]
        pub fn color(&self) -> i16 {
            match self {
                Entity::Polyline(polyline) => polyline.color,
                Entity::Circle(circle) => circle.color,
                Entity::Text(text) => text.color,
            }
        }

        /// 计算实体的 2D 轴对齐范围，文字退化为插入点。
        pub fn bounds(&self) -> Option<Bounds2D> {
            let mut bounds = Bounds2D::empty();
            match self {
                Entity::Polyline(polyline) => {
                    for vertex in &polyline.vertices {
                        bounds.include_point(*vertex);
                    }
                }
                Entity::Circle(circle) => {
                    let radius = circle.radius.abs();
                    let center = circle.center;
                    bounds.include_point(Point2::new(center.x() - radius, center.y() - radius));
                    bounds.include_point(Point2::new(center.x() + radius, center.y() + radius));
                }
                Entity::Text(text) => {
                    bounds.include_point(text.insert);
                }
            }
            if bounds.is_empty() { None } else { Some(bounds) }
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Polyline {
        pub vertices: Vec<Point2>,
        pub is_closed: bool,
        pub layer: String,
        pub color: i16,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Circle {
        pub center: Point2,
        pub radius: f64,
        pub layer: String,
        pub color: i16,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Text {
        pub insert: Point2,
        pub content: String,
        pub height: f64,
        pub rotation: f64,
        pub layer: String,
        pub color: i16,
    }

    /// 矢量图纸文档：有序实体列表加图层表，每块衣片对应一份。
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct Document {
        layers: HashMap<String, Layer>,
        entities: Vec<(EntityId, Entity)>,
        next_entity_id: u64,
    }

    impl Document {
        pub fn new() -> Self {
            let mut doc = Self::default();
            doc.ensure_layer("0", 7);
            doc
        }

        /// 按名称登记图层；已存在时保留原有颜色设置。
        pub fn ensure_layer(&mut self, name: impl AsRef<str>, color: i16) {
            let key = name.as_ref();
            self.layers
                .entry(key.to_string())
                .or_insert_with(|| Layer::new(key, color));
        }

        #[inline]
        pub fn layer(&self, name: &str) -> Option<&Layer> {
            self.layers.get(name)
        }

        #[inline]
        pub fn layers(&self) -> impl Iterator<Item = &Layer> {
            self.layers.values()
        }

        #[inline]
        pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
            self.entities.iter().map(|(id, entity)| (*id, entity))
        }

        pub fn entity(&self, id: EntityId) -> Option<&Entity> {
            self.entities
                .iter()
                .find(|(entity_id, _)| *entity_id == id)
                .map(|(_, entity)| entity)
        }

        pub fn entity_bounds(&self, id: EntityId) -> Option<Bounds2D> {
            self.entity(id).and_then(Entity::bounds)
        }

        pub fn add_polyline<I>(
            &mut self,
            vertices: I,
            is_closed: bool,
            layer: impl Into<String>,
            color: i16,
        ) -> EntityId
        where
            I: IntoIterator<Item = Point2>,
        {
            let layer = layer.into();
            self.ensure_layer(&layer, color);
            let id = self.next_id();
            self.entities.push((
                id,
                Entity::Polyline(Polyline {
                    vertices: vertices.into_iter().collect(),
                    is_closed,
                    layer,
                    color,
                }),
            ));
            id
        }

        pub fn add_circle(
            &mut self,
            center: Point2,
            radius: f64,
            layer: impl Into<String>,
            color: i16,
        ) -> EntityId {
            let layer = layer.into();
            self.ensure_layer(&layer, color);
            let id = self.next_id();
            self.entities.push((
                id,
                Entity::Circle(Circle {
                    center,
                    radius,
                    layer,
                    color,
                }),
            ));
            id
        }

        pub fn add_text(
            &mut self,
            insert: Point2,
            content: impl Into<String>,
            height: f64,
            rotation: f64,
            layer: impl Into<String>,
            color: i16,
        ) -> EntityId {
            let layer = layer.into();
            self.ensure_layer(&layer, color);
            let id = self.next_id();
            self.entities.push((
                id,
                Entity::Text(Text {
                    insert,
                    content: content.into(),
                    height,
                    rotation,
                    layer,
                    color,
                }),
            ));
            id
        }

        /// 全文档包围盒，导出时用来摆放标题与注释。
        pub fn bounds(&self) -> Option<Bounds2D> {
            let mut bounds = Bounds2D::empty();
            let mut has = false;
            for (_, entity) in &self.entities {
                if let Some(entity_bounds) = entity.bounds() {
                    bounds.include_bounds(&entity_bounds);
                    has = true;
                }
            }
            if has { Some(bounds) } else { None }
        }

        fn next_id(&mut self) -> EntityId {
            let id = EntityId::new(self.next_entity_id);
            self.next_entity_id += 1;
            id
        }
    }
}

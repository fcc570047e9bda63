// 该文件是 Xunmu （寻目） 项目的一部分。
// src/model/ssd.rs - 冻结图目标检测模型
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  frame::RgbNhwcFrame,
  model::{
    BoundingBox, DetectResult, Detection, Model,
    engine::{EngineError, InferenceEngine, NamedOutputs},
    labels::{LabelError, LabelTable},
  },
  url_path,
};

pub const INPUT_NODE: &str = "image_tensor";
pub const OUTPUT_BOXES_NODE: &str = "detection_boxes";
pub const OUTPUT_SCORES_NODE: &str = "detection_scores";
pub const OUTPUT_CLASSES_NODE: &str = "detection_classes";
pub const NUM_DETECTIONS_NODE: &str = "num_detections";

/// 加载时必须存在的计算图节点
const REQUIRED_NODES: [&str; 4] = [
  INPUT_NODE,
  OUTPUT_SCORES_NODE,
  OUTPUT_BOXES_NODE,
  OUTPUT_CLASSES_NODE,
];

const OUTPUT_NODES: [&str; 4] = [
  OUTPUT_BOXES_NODE,
  OUTPUT_SCORES_NODE,
  OUTPUT_CLASSES_NODE,
  NUM_DETECTIONS_NODE,
];

/// 输出缓冲区的候选框数量上限
pub const DEFAULT_CANDIDATE_CAPACITY: usize = 1001;
/// 严格大于该值的候选框才会保留
pub const SCORE_THRESHOLD: f32 = 0.5;

const UNKNOWN_LABEL: &str = "unknown";

#[derive(Error, Debug)]
pub enum SsdError {
  #[error("无法读取模型文件 [{0}]: {1}")]
  ModelRead(PathBuf, std::io::Error),
  #[error(transparent)]
  LabelRead(#[from] LabelError),
  #[error("推理引擎错误: {0}")]
  Engine(#[from] EngineError),
  #[error("计算图中找不到节点 '{0}'")]
  MissingNode(String),
  #[error("推理结果缺少输出 '{0}'")]
  MissingOutput(String),
  #[error("模型路径错误: {0}")]
  ModelPathError(String),
  #[error("未指定标签文件")]
  LabelsNotSet,
}

/// 检测框宽高字段的含义
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoxConvention {
  /// `width`/`height` 为真实宽高 `(x_max - x_min, y_max - y_min)`
  #[default]
  Extent,
  /// `width`/`height` 直接存放右下角坐标 `(x_max, y_max)`，与旧版输出一致
  MaxCorner,
}

/// 扫描哪些候选框
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateScan {
  /// 扫描整个缓冲区，忽略模型报告的检测数量
  #[default]
  FullBuffer,
  /// 只扫描前 `num_detections` 个候选框
  ReportedCount,
}

/// 单次推理的原始输出，长度固定为容量
#[derive(Debug, Clone, PartialEq)]
pub struct RawOutputs {
  /// 每个候选框 4 个归一化坐标 `[y_min, x_min, y_max, x_max]`
  pub boxes: Box<[f32]>,
  pub scores: Box<[f32]>,
  pub classes: Box<[f32]>,
  pub num_detections: f32,
}

impl RawOutputs {
  pub fn zeroed(capacity: usize) -> Self {
    RawOutputs {
      boxes: vec![0.0; capacity * 4].into_boxed_slice(),
      scores: vec![0.0; capacity].into_boxed_slice(),
      classes: vec![0.0; capacity].into_boxed_slice(),
      num_detections: 0.0,
    }
  }

  pub fn capacity(&self) -> usize {
    self.scores.len()
  }

  /// 把引擎输出复制进固定容量的缓冲区，多余部分截断，不足部分补零
  pub fn from_named(outputs: &NamedOutputs, capacity: usize) -> Result<Self, SsdError> {
    let fetch = |name: &str| {
      outputs
        .get(name)
        .ok_or_else(|| SsdError::MissingOutput(name.to_string()))
    };

    let mut raw = RawOutputs::zeroed(capacity);
    copy_prefix(&mut raw.boxes, fetch(OUTPUT_BOXES_NODE)?);
    copy_prefix(&mut raw.scores, fetch(OUTPUT_SCORES_NODE)?);
    copy_prefix(&mut raw.classes, fetch(OUTPUT_CLASSES_NODE)?);
    raw.num_detections = fetch(NUM_DETECTIONS_NODE)?.first().copied().unwrap_or(0.0);
    Ok(raw)
  }

  fn bbox(&self, index: usize, width: f32, height: f32, convention: BoxConvention) -> BoundingBox {
    let b = &self.boxes[index * 4..index * 4 + 4];
    let (y_min, x_min, y_max, x_max) = (b[0] * height, b[1] * width, b[2] * height, b[3] * width);
    match convention {
      BoxConvention::Extent => BoundingBox {
        x: x_min,
        y: y_min,
        width: x_max - x_min,
        height: y_max - y_min,
      },
      BoxConvention::MaxCorner => BoundingBox {
        x: x_min,
        y: y_min,
        width: x_max,
        height: y_max,
      },
    }
  }
}

fn copy_prefix(dst: &mut [f32], src: &[f32]) {
  let n = dst.len().min(src.len());
  dst[..n].copy_from_slice(&src[..n]);
}

/// 堆中的候选项：置信度高者优先，相同置信度下标小者优先
struct Ranked(Detection, usize);

impl PartialEq for Ranked {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Ranked {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .0
      .confidence
      .total_cmp(&other.0.confidence)
      .then_with(|| other.1.cmp(&self.1))
  }
}

/// 从原始输出中选出置信度高于阈值的检测结果，按置信度降序排列
pub fn select_detections(
  raw: &RawOutputs,
  labels: &LabelTable,
  image_width: u32,
  image_height: u32,
  convention: BoxConvention,
  scan: CandidateScan,
) -> Vec<Detection> {
  let capacity = raw.capacity();
  let limit = match scan {
    CandidateScan::FullBuffer => capacity,
    CandidateScan::ReportedCount => (raw.num_detections.max(0.0) as usize).min(capacity),
  };
  let (width, height) = (image_width as f32, image_height as f32);

  let mut heap = BinaryHeap::new();
  for i in 0..limit {
    let score = raw.scores[i];
    // NaN 不参与比较，必须显式排除
    if score.is_nan() || score <= SCORE_THRESHOLD {
      continue;
    }

    let class = raw.classes[i];
    let index = (class.is_finite() && class >= 0.0).then_some(class as usize);
    let label = match index.and_then(|index| labels.get(index)) {
      Some(label) => label.to_string(),
      None => {
        warn!("类别 {} 超出标签表范围 ({})", class, labels.len());
        UNKNOWN_LABEL.to_string()
      }
    };

    let detection = Detection {
      id: i.to_string(),
      label,
      confidence: score,
      bbox: raw.bbox(i, width, height, convention),
    };
    heap.push(Ranked(detection, i));
  }

  std::iter::from_fn(|| heap.pop().map(|Ranked(d, _)| d))
    .take(capacity)
    .collect()
}

pub struct SsdDetector<E> {
  engine: E,
  labels: LabelTable,
  capacity: usize,
  convention: BoxConvention,
  scan: CandidateScan,
}

impl<E: InferenceEngine> SsdDetector<E> {
  /// 检查计算图入口节点后包装引擎
  pub fn from_engine(engine: E, labels: LabelTable) -> Result<Self, SsdError> {
    for name in REQUIRED_NODES {
      if !engine.has_node(name) {
        return Err(SsdError::MissingNode(name.to_string()));
      }
    }

    Ok(SsdDetector {
      engine,
      labels,
      capacity: DEFAULT_CANDIDATE_CAPACITY,
      convention: BoxConvention::default(),
      scan: CandidateScan::default(),
    })
  }

  pub fn with_capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  pub fn with_box_convention(mut self, convention: BoxConvention) -> Self {
    self.convention = convention;
    self
  }

  pub fn with_candidate_scan(mut self, scan: CandidateScan) -> Self {
    self.scan = scan;
    self
  }

  pub fn labels(&self) -> &LabelTable {
    &self.labels
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }
}

impl<E: InferenceEngine> Model for SsdDetector<E> {
  type Input = RgbNhwcFrame;
  type Output = DetectResult;
  type Error = SsdError;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
    debug!("执行模型推理: {}x{}", input.width(), input.height());
    let outputs = self.engine.run(INPUT_NODE, input, &OUTPUT_NODES)?;

    let raw = RawOutputs::from_named(&outputs, self.capacity)?;
    debug!("模型报告检测数量: {}", raw.num_detections);

    let items = select_detections(
      &raw,
      &self.labels,
      input.width() as u32,
      input.height() as u32,
      self.convention,
      self.scan,
    );
    debug!("检测到 {} 个物体", items.len());

    Ok(DetectResult {
      items: items.into_boxed_slice(),
    })
  }
}

pub struct SsdDetectorBuilder {
  model_path: PathBuf,
  labels_path: Option<PathBuf>,
  capacity: usize,
  convention: BoxConvention,
  scan: CandidateScan,
}

impl FromUrlWithScheme for SsdDetectorBuilder {
  const SCHEME: &'static str = "frozen";
}

impl FromUrl for SsdDetectorBuilder {
  type Error = SsdError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if !Self::accepts(url) {
      return Err(SsdError::ModelPathError(format!(
        "模型路径必须使用 {} 方案",
        Self::SCHEME
      )));
    }

    Ok(SsdDetectorBuilder::new(url_path(url)))
  }
}

impl SsdDetectorBuilder {
  pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
    SsdDetectorBuilder {
      model_path: model_path.into(),
      labels_path: None,
      capacity: DEFAULT_CANDIDATE_CAPACITY,
      convention: BoxConvention::default(),
      scan: CandidateScan::default(),
    }
  }

  pub fn labels<P: Into<PathBuf>>(mut self, path: P) -> Self {
    self.labels_path = Some(path.into());
    self
  }

  pub fn capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  pub fn box_convention(mut self, convention: BoxConvention) -> Self {
    self.convention = convention;
    self
  }

  pub fn candidate_scan(mut self, scan: CandidateScan) -> Self {
    self.scan = scan;
    self
  }

  pub fn build<E: InferenceEngine>(self) -> Result<SsdDetector<E>, SsdError> {
    let labels_path = self.labels_path.ok_or(SsdError::LabelsNotSet)?;
    let labels = LabelTable::load(&labels_path)?;

    info!("加载模型文件: {}", self.model_path.display());
    let graph_def =
      std::fs::read(&self.model_path).map_err(|e| SsdError::ModelRead(self.model_path.clone(), e))?;
    debug!(
      "模型文件大小: {:.2} MB",
      graph_def.len() as f64 / (1024.0 * 1024.0)
    );

    let engine = E::load(&graph_def)?;
    let detector = SsdDetector::from_engine(engine, labels)?
      .with_capacity(self.capacity)
      .with_box_convention(self.convention)
      .with_candidate_scan(self.scan);
    info!("模型加载完成");

    Ok(detector)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;
  use std::cell::Cell;
  use std::io::Write;

  /// 内存中的引擎：计算图是一行一个节点名，输出预先给定
  struct FakeEngine {
    nodes: Vec<String>,
    outputs: NamedOutputs,
    runs: Cell<usize>,
  }

  impl FakeEngine {
    fn with_outputs(outputs: NamedOutputs) -> Self {
      FakeEngine {
        nodes: REQUIRED_NODES.iter().map(|s| s.to_string()).collect(),
        outputs,
        runs: Cell::new(0),
      }
    }
  }

  impl InferenceEngine for FakeEngine {
    fn load(graph_def: &[u8]) -> Result<Self, EngineError> {
      let text =
        std::str::from_utf8(graph_def).map_err(|e| EngineError::GraphParse(e.to_string()))?;
      Ok(FakeEngine {
        nodes: text.lines().map(str::to_string).collect(),
        outputs: NamedOutputs::default(),
        runs: Cell::new(0),
      })
    }

    fn has_node(&self, name: &str) -> bool {
      self.nodes.iter().any(|n| n == name)
    }

    fn run(
      &self,
      input_name: &str,
      input: &RgbNhwcFrame,
      output_names: &[&str],
    ) -> Result<NamedOutputs, EngineError> {
      assert_eq!(input_name, INPUT_NODE);
      assert_eq!(input.shape()[0], 1);
      assert_eq!(output_names, &OUTPUT_NODES);
      self.runs.set(self.runs.get() + 1);
      Ok(self.outputs.clone())
    }
  }

  fn labels() -> LabelTable {
    ["???", "person", "bicycle", "car"].into_iter().collect()
  }

  /// 按 (score, class, [y_min, x_min, y_max, x_max]) 构造原始输出
  fn raw_with(capacity: usize, candidates: &[(f32, f32, [f32; 4])]) -> RawOutputs {
    let mut raw = RawOutputs::zeroed(capacity);
    for (i, (score, class, b)) in candidates.iter().enumerate() {
      raw.scores[i] = *score;
      raw.classes[i] = *class;
      raw.boxes[i * 4..i * 4 + 4].copy_from_slice(b);
    }
    raw.num_detections = candidates.len() as f32;
    raw
  }

  fn select(raw: &RawOutputs) -> Vec<Detection> {
    select_detections(
      raw,
      &labels(),
      100,
      100,
      BoxConvention::Extent,
      CandidateScan::FullBuffer,
    )
  }

  const UNIT: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

  #[test]
  fn threshold_is_strict() {
    let raw = raw_with(
      DEFAULT_CANDIDATE_CAPACITY,
      &[(0.5, 1.0, UNIT), (0.500001, 2.0, UNIT), (0.49, 3.0, UNIT), (1.0, 1.0, UNIT)],
    );
    let ids: Vec<_> = select(&raw).into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["3", "1"]);
  }

  #[test]
  fn sorted_by_descending_confidence() {
    let raw = raw_with(
      DEFAULT_CANDIDATE_CAPACITY,
      &[
        (0.6, 1.0, UNIT),
        (0.9, 2.0, UNIT),
        (0.7, 3.0, UNIT),
        (0.95, 1.0, UNIT),
        (0.8, 2.0, UNIT),
      ],
    );
    let detections = select(&raw);
    assert_eq!(detections.len(), 5);
    assert!(
      detections
        .windows(2)
        .all(|w| w[0].confidence >= w[1].confidence)
    );
    assert_eq!(detections[0].id, "3");
    assert_eq!(detections[0].label, "person");
    assert_eq!(detections[1].label, "bicycle");
  }

  #[test]
  fn ties_keep_candidate_order() {
    let raw = raw_with(
      DEFAULT_CANDIDATE_CAPACITY,
      &[(0.75, 1.0, UNIT), (0.9, 1.0, UNIT), (0.75, 2.0, UNIT), (0.75, 3.0, UNIT)],
    );
    let ids: Vec<_> = select(&raw).into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["1", "0", "2", "3"]);
  }

  #[test]
  fn zero_scores_yield_nothing() {
    let raw = RawOutputs::zeroed(DEFAULT_CANDIDATE_CAPACITY);
    assert!(select(&raw).is_empty());
  }

  #[test]
  fn nan_score_is_dropped() {
    let raw = raw_with(4, &[(0.9, 1.0, UNIT), (f32::NAN, 2.0, UNIT)]);
    let detections = select(&raw);
    let ids: Vec<_> = detections.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["0"]);
    assert!(detections.iter().all(|d| d.confidence > SCORE_THRESHOLD));
  }

  #[test]
  fn result_never_exceeds_capacity() {
    let mut raw = RawOutputs::zeroed(DEFAULT_CANDIDATE_CAPACITY);
    raw.scores.fill(0.9);
    raw.classes.fill(1.0);
    let detections = select(&raw);
    assert_eq!(detections.len(), DEFAULT_CANDIDATE_CAPACITY);
  }

  #[test]
  fn extent_convention_uses_true_size() {
    let raw = raw_with(8, &[(0.9, 1.0, [0.1, 0.2, 0.6, 0.8])]);
    let d = &select_detections(
      &raw,
      &labels(),
      640,
      480,
      BoxConvention::Extent,
      CandidateScan::FullBuffer,
    )[0];
    assert_relative_eq!(d.bbox.x, 0.2 * 640.0, epsilon = 1e-3);
    assert_relative_eq!(d.bbox.y, 0.1 * 480.0, epsilon = 1e-3);
    assert_relative_eq!(d.bbox.width, 0.6 * 640.0, epsilon = 1e-3);
    assert_relative_eq!(d.bbox.height, 0.5 * 480.0, epsilon = 1e-3);
  }

  #[test]
  fn max_corner_convention_keeps_corner() {
    let raw = raw_with(8, &[(0.9, 1.0, [0.1, 0.2, 0.6, 0.8])]);
    let d = &select_detections(
      &raw,
      &labels(),
      640,
      480,
      BoxConvention::MaxCorner,
      CandidateScan::FullBuffer,
    )[0];
    assert_relative_eq!(d.bbox.x, 0.2 * 640.0, epsilon = 1e-3);
    assert_relative_eq!(d.bbox.y, 0.1 * 480.0, epsilon = 1e-3);
    assert_relative_eq!(d.bbox.width, 0.8 * 640.0, epsilon = 1e-3);
    assert_relative_eq!(d.bbox.height, 0.6 * 480.0, epsilon = 1e-3);
  }

  #[test]
  fn full_buffer_scan_ignores_reported_count() {
    let mut raw = raw_with(8, &[(0.9, 1.0, UNIT), (0.8, 2.0, UNIT), (0.7, 3.0, UNIT)]);
    raw.num_detections = 1.0;

    let full = select(&raw);
    assert_eq!(full.len(), 3);

    let reported = select_detections(
      &raw,
      &labels(),
      100,
      100,
      BoxConvention::Extent,
      CandidateScan::ReportedCount,
    );
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].id, "0");
  }

  #[test]
  fn out_of_range_class_is_unknown() {
    let raw = raw_with(8, &[(0.9, 42.0, UNIT)]);
    assert_eq!(select(&raw)[0].label, UNKNOWN_LABEL);
  }

  #[test]
  fn negative_or_nan_class_is_unknown() {
    let raw = raw_with(
      8,
      &[(0.9, -1.0, UNIT), (0.8, f32::NAN, UNIT), (0.7, f32::INFINITY, UNIT), (0.6, 0.0, UNIT)],
    );
    let labels: Vec<_> = select(&raw).into_iter().map(|d| d.label).collect();
    assert_eq!(labels, vec![UNKNOWN_LABEL, UNKNOWN_LABEL, UNKNOWN_LABEL, "???"]);
  }

  #[test]
  fn from_named_pads_and_truncates() {
    let outputs: NamedOutputs = [
      (OUTPUT_BOXES_NODE, vec![0.1; 4 * 10]),
      (OUTPUT_SCORES_NODE, vec![0.9; 2]),
      (OUTPUT_CLASSES_NODE, vec![1.0; 2]),
      (NUM_DETECTIONS_NODE, vec![2.0]),
    ]
    .into_iter()
    .collect();

    let raw = RawOutputs::from_named(&outputs, 4).unwrap();
    assert_eq!(raw.capacity(), 4);
    assert_eq!(raw.boxes.len(), 16);
    assert_eq!(&raw.scores[..], &[0.9, 0.9, 0.0, 0.0]);
    assert_eq!(raw.num_detections, 2.0);
  }

  #[test]
  fn from_named_requires_every_output() {
    let outputs: NamedOutputs = [
      (OUTPUT_BOXES_NODE, vec![0.0; 4]),
      (OUTPUT_SCORES_NODE, vec![0.0]),
      (OUTPUT_CLASSES_NODE, vec![0.0]),
    ]
    .into_iter()
    .collect();

    match RawOutputs::from_named(&outputs, 1) {
      Err(SsdError::MissingOutput(name)) => assert_eq!(name, NUM_DETECTIONS_NODE),
      other => panic!("unexpected result: {other:?}"),
    }
  }

  #[test]
  fn infer_runs_engine_and_ranks() {
    let mut boxes = vec![0.0; 4 * 3];
    boxes[4..8].copy_from_slice(&[0.1, 0.2, 0.6, 0.8]);
    let outputs: NamedOutputs = [
      (OUTPUT_BOXES_NODE, boxes),
      (OUTPUT_SCORES_NODE, vec![0.55, 0.97, 0.1]),
      (OUTPUT_CLASSES_NODE, vec![2.0, 1.0, 3.0]),
      (NUM_DETECTIONS_NODE, vec![3.0]),
    ]
    .into_iter()
    .collect();

    let detector = SsdDetector::from_engine(FakeEngine::with_outputs(outputs), labels()).unwrap();
    let frame = RgbNhwcFrame::with_shape(50, 100);
    let result = detector.infer(&frame).unwrap();

    assert_eq!(detector.engine.runs.get(), 1);
    assert_eq!(result.len(), 2);
    assert_eq!(result.items[0].label, "person");
    assert_eq!(result.items[0].id, "1");
    assert_relative_eq!(result.items[0].bbox.x, 20.0, epsilon = 1e-3);
    assert_relative_eq!(result.items[0].bbox.y, 5.0, epsilon = 1e-3);
    assert_relative_eq!(result.items[0].bbox.width, 60.0, epsilon = 1e-3);
    assert_relative_eq!(result.items[0].bbox.height, 25.0, epsilon = 1e-3);
    assert_eq!(result.items[1].label, "bicycle");
  }

  #[test]
  fn from_engine_rejects_missing_node() {
    let mut engine = FakeEngine::with_outputs(NamedOutputs::default());
    engine.nodes.retain(|n| n != OUTPUT_CLASSES_NODE);
    match SsdDetector::from_engine(engine, labels()) {
      Err(SsdError::MissingNode(name)) => assert_eq!(name, OUTPUT_CLASSES_NODE),
      Err(e) => panic!("unexpected error: {e}"),
      Ok(_) => panic!("missing node accepted"),
    }
  }

  #[test]
  fn builder_loads_graph_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("frozen_inference_graph.pb");
    std::fs::write(&model, REQUIRED_NODES.join("\n")).unwrap();
    let labels = dir.path().join("labels.txt");
    let mut file = std::fs::File::create(&labels).unwrap();
    writeln!(file, "???\nperson").unwrap();

    let url = Url::parse(&format!("frozen://{}", model.display())).unwrap();
    let detector: SsdDetector<FakeEngine> = SsdDetectorBuilder::from_url(&url)
      .unwrap()
      .labels(&labels)
      .capacity(10)
      .build()
      .unwrap();
    assert_eq!(detector.labels().len(), 2);
    assert_eq!(detector.capacity(), 10);
  }

  #[test]
  fn builder_reports_unreadable_model() {
    let dir = tempfile::tempdir().unwrap();
    let labels = dir.path().join("labels.txt");
    std::fs::write(&labels, "person\n").unwrap();

    let result = SsdDetectorBuilder::new(dir.path().join("missing.pb"))
      .labels(&labels)
      .build::<FakeEngine>();
    assert!(matches!(result, Err(SsdError::ModelRead(_, _))));
  }

  #[test]
  fn builder_reports_unreadable_labels() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("graph.pb");
    std::fs::write(&model, REQUIRED_NODES.join("\n")).unwrap();

    let result = SsdDetectorBuilder::new(&model)
      .labels(dir.path().join("missing.txt"))
      .build::<FakeEngine>();
    assert!(matches!(result, Err(SsdError::LabelRead(_))));
  }

  #[test]
  fn builder_rejects_graph_without_input() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("graph.pb");
    std::fs::write(&model, "detection_boxes\ndetection_scores\ndetection_classes").unwrap();
    let labels = dir.path().join("labels.txt");
    std::fs::write(&labels, "person\n").unwrap();

    let result = SsdDetectorBuilder::new(&model)
      .labels(&labels)
      .build::<FakeEngine>();
    assert!(matches!(result, Err(SsdError::MissingNode(name)) if name == INPUT_NODE));
  }

  #[test]
  fn builder_rejects_foreign_scheme() {
    let url = Url::parse("onnx:///tmp/model.onnx").unwrap();
    assert!(matches!(
      SsdDetectorBuilder::from_url(&url),
      Err(SsdError::ModelPathError(_))
    ));
  }
}

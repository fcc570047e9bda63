// 该文件是 Xunmu （寻目） 项目的一部分。
// src/model.rs - 模型
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

pub trait Model {
  type Input;
  type Output;
  type Error;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// 图像像素坐标下的轴对齐矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
  /// 候选框在输出缓冲区中的下标
  pub id: String,
  pub label: String,
  pub confidence: f32,
  pub bbox: BoundingBox,
}

#[derive(Debug, Clone, Default)]
pub struct DetectResult {
  /// 按置信度降序排列
  pub items: Box<[Detection]>,
}

impl DetectResult {
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }
}

mod engine;
mod labels;
mod ssd;
#[cfg(feature = "backend_tensorflow")]
mod tensorflow_engine;
#[cfg(feature = "backend_tract")]
mod tract_engine;

pub use self::engine::{EngineError, InferenceEngine, NamedOutputs};
pub use self::labels::{LabelError, LabelTable};
pub use self::ssd::{
  BoxConvention, CandidateScan, DEFAULT_CANDIDATE_CAPACITY, INPUT_NODE, NUM_DETECTIONS_NODE,
  OUTPUT_BOXES_NODE, OUTPUT_CLASSES_NODE, OUTPUT_SCORES_NODE, RawOutputs, SCORE_THRESHOLD,
  SsdDetector, SsdDetectorBuilder, SsdError, select_detections,
};
#[cfg(feature = "backend_tensorflow")]
pub use self::tensorflow_engine::TensorflowEngine;
#[cfg(feature = "backend_tract")]
pub use self::tract_engine::TractEngine;

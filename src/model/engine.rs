// 该文件是 Xunmu （寻目） 项目的一部分。
// src/model/engine.rs - 推理引擎接口
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

use std::collections::HashMap;

use thiserror::Error;

use crate::frame::RgbNhwcFrame;

#[derive(Error, Debug)]
pub enum EngineError {
  #[error("计算图解析失败: {0}")]
  GraphParse(String),
  #[error("推理执行失败: {0}")]
  Run(String),
  #[error("输出张量 '{0}' 类型转换失败: {1}")]
  OutputType(String, String),
}

/// 冻结计算图的推理引擎
///
/// 只需要两个能力：从字节加载计算图，以及以命名输入执行一次同步推理。
pub trait InferenceEngine: Sized {
  fn load(graph_def: &[u8]) -> Result<Self, EngineError>;

  fn has_node(&self, name: &str) -> bool;

  /// 阻塞执行，直到引擎返回全部输出
  fn run(
    &self,
    input_name: &str,
    input: &RgbNhwcFrame,
    output_names: &[&str],
  ) -> Result<NamedOutputs, EngineError>;
}

/// 按名称索引的输出缓冲区
#[derive(Debug, Clone, Default)]
pub struct NamedOutputs {
  buffers: HashMap<String, Box<[f32]>>,
}

impl NamedOutputs {
  pub fn insert<S: Into<String>>(&mut self, name: S, values: Vec<f32>) {
    self.buffers.insert(name.into(), values.into_boxed_slice());
  }

  pub fn get(&self, name: &str) -> Option<&[f32]> {
    self.buffers.get(name).map(|b| &b[..])
  }

  pub fn len(&self) -> usize {
    self.buffers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffers.is_empty()
  }
}

impl<S: Into<String>> FromIterator<(S, Vec<f32>)> for NamedOutputs {
  fn from_iter<I: IntoIterator<Item = (S, Vec<f32>)>>(iter: I) -> Self {
    let mut outputs = NamedOutputs::default();
    for (name, values) in iter {
      outputs.insert(name, values);
    }
    outputs
  }
}

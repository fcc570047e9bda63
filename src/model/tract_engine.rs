// 该文件是 Xunmu （寻目） 项目的一部分。
// src/model/tract_engine.rs - 基于 tract 的 TensorFlow 冻结图推理
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

use tracing::debug;
use tract_tensorflow::prelude::*;

use crate::{
  frame::RgbNhwcFrame,
  model::engine::{EngineError, InferenceEngine, NamedOutputs},
};

/// 冻结 GraphDef 的 tract 推理后端
///
/// 输入图像尺寸每次调用都可能不同，因此计算图在 `run` 中按具体形状优化。
pub struct TractEngine {
  model: InferenceModel,
}

impl InferenceEngine for TractEngine {
  fn load(graph_def: &[u8]) -> Result<Self, EngineError> {
    let mut reader = graph_def;
    let model = tract_tensorflow::tensorflow()
      .model_for_read(&mut reader)
      .map_err(|e| EngineError::GraphParse(format!("{e:#}")))?;
    debug!("计算图节点数量: {}", model.nodes().len());
    Ok(TractEngine { model })
  }

  fn has_node(&self, name: &str) -> bool {
    self.model.node_id_by_name(name).is_ok()
  }

  fn run(
    &self,
    input_name: &str,
    input: &RgbNhwcFrame,
    output_names: &[&str],
  ) -> Result<NamedOutputs, EngineError> {
    let run_err = |e: TractError| EngineError::Run(format!("{e:#}"));

    let shape = input.shape();
    let plan = self
      .model
      .clone()
      .with_input_names([input_name])
      .and_then(|m| {
        m.with_input_fact(
          0,
          InferenceFact::dt_shape(u8::datum_type(), tvec!(shape[0], shape[1], shape[2], shape[3])),
        )
      })
      .and_then(|m| m.with_output_names(output_names.iter().copied()))
      .and_then(|m| m.into_optimized())
      .and_then(|m| m.into_runnable())
      .map_err(run_err)?;

    let tensor = Tensor::from_shape::<u8>(&shape, input.as_nhwc()).map_err(run_err)?;
    let values = plan.run(tvec!(tensor.into())).map_err(run_err)?;

    let mut outputs = NamedOutputs::default();
    for (name, value) in output_names.iter().zip(values.iter()) {
      let cast = value
        .cast_to::<f32>()
        .map_err(|e| EngineError::OutputType(name.to_string(), format!("{e:#}")))?;
      let data = cast
        .as_slice::<f32>()
        .map_err(|e| EngineError::OutputType(name.to_string(), format!("{e:#}")))?;
      debug!("输出 {}: {} 个元素", name, data.len());
      outputs.insert(*name, data.to_vec());
    }

    Ok(outputs)
  }
}

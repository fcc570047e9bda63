// 该文件是 Xunmu （寻目） 项目的一部分。
// src/model/tensorflow_engine.rs - TensorFlow C 运行时推理后端
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

use tensorflow::{
  Graph, ImportGraphDefOptions, Session, SessionOptions, SessionRunArgs, Status, Tensor,
};
use tracing::debug;

use crate::{
  frame::RgbNhwcFrame,
  model::engine::{EngineError, InferenceEngine, NamedOutputs},
};

/// 基于 libtensorflow 的推理后端
///
/// 支持目标检测计算图中的全部算子（NonMaxSuppression、TensorArray 等）。
pub struct TensorflowEngine {
  graph: Graph,
  session: Session,
}

impl InferenceEngine for TensorflowEngine {
  fn load(graph_def: &[u8]) -> Result<Self, EngineError> {
    let parse_err = |e: Status| EngineError::GraphParse(e.to_string());

    let mut graph = Graph::new();
    graph
      .import_graph_def(graph_def, &ImportGraphDefOptions::new())
      .map_err(parse_err)?;
    let session = Session::new(&SessionOptions::new(), &graph).map_err(parse_err)?;
    debug!("计算图导入完成，会话已创建");

    Ok(TensorflowEngine { graph, session })
  }

  fn has_node(&self, name: &str) -> bool {
    matches!(self.graph.operation_by_name(name), Ok(Some(_)))
  }

  fn run(
    &self,
    input_name: &str,
    input: &RgbNhwcFrame,
    output_names: &[&str],
  ) -> Result<NamedOutputs, EngineError> {
    let run_err = |e: Status| EngineError::Run(e.to_string());

    let dims = input.shape().map(|d| d as u64);
    let tensor = Tensor::<u8>::new(&dims)
      .with_values(input.as_nhwc())
      .map_err(run_err)?;

    let input_op = self
      .graph
      .operation_by_name_required(input_name)
      .map_err(run_err)?;

    let mut args = SessionRunArgs::new();
    args.add_feed(&input_op, 0, &tensor);
    let mut tokens = Vec::with_capacity(output_names.len());
    for name in output_names {
      let op = self.graph.operation_by_name_required(name).map_err(run_err)?;
      tokens.push((*name, args.request_fetch(&op, 0)));
    }

    self.session.run(&mut args).map_err(run_err)?;

    let mut outputs = NamedOutputs::default();
    for (name, token) in tokens {
      let value: Tensor<f32> = args
        .fetch(token)
        .map_err(|e| EngineError::OutputType(name.to_string(), e.to_string()))?;
      debug!("输出 {}: {} 个元素", name, value.len());
      outputs.insert(name, value.to_vec());
    }

    Ok(outputs)
  }
}

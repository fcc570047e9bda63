// 该文件是 Xunmu （寻目） 项目的一部分。
// src/task.rs - 推理任务
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

use std::io::Write;

use tracing::info;

use crate::{
  model::{DetectResult, Model},
  output::Render,
};

pub trait Task<I, M, O>: Sized {
  type Error;
  fn run_task(self, input: I, model: M, output: O) -> Result<DetectResult, Self::Error>;
}

/// 取一帧，推理一次，输出一次
///
/// 每个检测结果在报告中打印一行 `Title <label> Score <confidence>`。
pub struct OneShotTask<W> {
  report: W,
}

impl Default for OneShotTask<std::io::Stdout> {
  fn default() -> Self {
    OneShotTask {
      report: std::io::stdout(),
    }
  }
}

impl<W: Write> OneShotTask<W> {
  pub fn with_report(report: W) -> Self {
    OneShotTask { report }
  }
}

/// 置信度始终带小数点，如 `1.0`、`0.75`
pub fn write_report<W: Write>(report: &mut W, result: &DetectResult) -> std::io::Result<()> {
  for item in result.items.iter() {
    writeln!(report, "Title {} Score {:?}", item.label, item.confidence)?;
  }
  report.flush()
}

impl<
  F,
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  W: Write,
  I: Iterator<Item = F>,
  M: Model<Input = F, Output = DetectResult, Error = ME>,
  O: Render<F, DetectResult, Error = RE>,
> Task<I, M, O> for OneShotTask<W>
{
  type Error = anyhow::Error;

  fn run_task(mut self, mut input: I, model: M, output: O) -> Result<DetectResult, Self::Error> {
    info!("开始任务...");
    let frame = input.next().ok_or_else(|| anyhow::anyhow!("没有输入帧"))?;
    info!("输入帧获取成功，开始推理...");
    let now = std::time::Instant::now();
    let result = model.infer(&frame)?;
    info!("推理完成，耗时: {:.2?}，检测到 {} 个物体", now.elapsed(), result.len());

    write_report(&mut self.report, &result)?;

    let now = std::time::Instant::now();
    output.render_result(&frame, &result)?;
    info!("渲染完成，耗时: {:.2?}", now.elapsed());

    Ok(result)
  }
}

// 该文件是 Xunmu （寻目） 项目的一部分。
// src/bin/simple_oneshot.rs - 单张图像目标检测
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

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use url::Url;

#[cfg(feature = "backend_tensorflow")]
use xunmu::model::TensorflowEngine;
#[cfg(feature = "backend_tract")]
use xunmu::model::TractEngine;
use xunmu::{
  FromUrl,
  input::InputWrapper,
  model::{BoxConvention, CandidateScan, InferenceEngine, SsdDetector, SsdDetectorBuilder},
  output::OutputWrapper,
  parse_location,
  task::{OneShotTask, Task},
};

#[cfg(not(any(feature = "backend_tract", feature = "backend_tensorflow")))]
compile_error!("至少需要启用一个推理后端: backend_tract 或 backend_tensorflow");

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum BackendArg {
  /// 纯 Rust 的 tract 运行时，不支持 NonMaxSuppression 等后处理算子
  #[cfg(feature = "backend_tract")]
  #[cfg_attr(not(feature = "backend_tensorflow"), default)]
  Tract,
  /// libtensorflow 运行时
  #[cfg(feature = "backend_tensorflow")]
  #[default]
  Tensorflow,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BoxConventionArg {
  /// 宽高为真实尺寸
  Extent,
  /// 宽高字段存放右下角坐标
  MaxCorner,
}

impl From<BoxConventionArg> for BoxConvention {
  fn from(arg: BoxConventionArg) -> Self {
    match arg {
      BoxConventionArg::Extent => BoxConvention::Extent,
      BoxConventionArg::MaxCorner => BoxConvention::MaxCorner,
    }
  }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScanArg {
  /// 扫描整个输出缓冲区
  Full,
  /// 只扫描模型报告的检测数量
  Reported,
}

impl From<ScanArg> for CandidateScan {
  fn from(arg: ScanArg) -> Self {
    match arg {
      ScanArg::Full => CandidateScan::FullBuffer,
      ScanArg::Reported => CandidateScan::ReportedCount,
    }
  }
}

/// Xunmu 单张图像检测参数
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 冻结计算图文件（frozen:///path/graph.pb 或文件路径）
  #[arg(long, value_name = "MODEL", value_parser = parse_location)]
  pub model: Url,
  /// 标签文件，每行一个类别名
  #[arg(long, value_name = "LABELS")]
  pub labels: PathBuf,
  /// 输入图像（image:///path/in.jpg 或文件路径）
  #[arg(long, value_name = "SOURCE", value_parser = parse_location)]
  pub input: Url,
  /// 输出图像（JPEG 编码）
  #[arg(long, value_name = "OUTPUT", value_parser = parse_location)]
  pub output: Url,
  /// 检测框宽高的含义
  #[arg(long, value_enum, default_value = "extent")]
  box_convention: BoxConventionArg,
  /// 候选框扫描范围
  #[arg(long, value_enum, default_value = "full")]
  scan: ScanArg,
  /// 推理后端
  #[arg(long, value_enum, default_value_t = BackendArg::default())]
  backend: BackendArg,
}

fn load_model<E: InferenceEngine>(args: &Args) -> SsdDetector<E> {
  // 模型或标签无法加载时直接退出
  match SsdDetectorBuilder::from_url(&args.model).and_then(|builder| {
    builder
      .labels(&args.labels)
      .box_convention(args.box_convention.into())
      .candidate_scan(args.scan.into())
      .build::<E>()
  }) {
    Ok(model) => model,
    Err(e) => {
      error!("模型加载失败: {}", e);
      eprintln!("{e}");
      std::process::exit(1);
    }
  }
}

fn run<E: InferenceEngine>(args: &Args) -> Result<()> {
  let model: SsdDetector<E> = load_model(args);
  let input_image = InputWrapper::from_url(&args.input)?;
  let output = OutputWrapper::from_url(&args.output)?;

  OneShotTask::default().run_task(input_image.into_nhwc(), model, output)?;

  Ok(())
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("模型文件路径: {}", args.model);
  info!("标签文件路径: {}", args.labels.display());
  info!("输入来源: {}", args.input);
  info!("输出路径: {}", args.output);
  info!("推理后端: {:?}", args.backend);

  match args.backend {
    #[cfg(feature = "backend_tract")]
    BackendArg::Tract => run::<TractEngine>(&args),
    #[cfg(feature = "backend_tensorflow")]
    BackendArg::Tensorflow => run::<TensorflowEngine>(&args),
  }
}

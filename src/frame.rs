// 该文件是 Xunmu （寻目） 项目的一部分。
// src/frame.rs - NHWC 帧定义
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

use thiserror::Error;

pub const RGB_CHANNELS: usize = 3;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("数据长度不匹配: 期望长度 {expected}, 实际长度 {actual}")]
pub struct FrameSizeError {
  pub expected: usize,
  pub actual: usize,
}

/// 单张 RGB 图像的 `[1, H, W, 3]` 张量数据，按行、列、通道排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbNhwcFrame {
  height: usize,
  width: usize,
  data: Box<[u8]>,
}

impl RgbNhwcFrame {
  pub fn with_shape(height: usize, width: usize) -> Self {
    let size = RGB_CHANNELS * width * height;
    Self {
      height,
      width,
      data: vec![0u8; size].into_boxed_slice(),
    }
  }

  pub fn from_raw(height: usize, width: usize, data: Vec<u8>) -> Result<Self, FrameSizeError> {
    let expected = RGB_CHANNELS * width * height;
    if data.len() != expected {
      return Err(FrameSizeError {
        expected,
        actual: data.len(),
      });
    }

    Ok(Self {
      height,
      width,
      data: data.into_boxed_slice(),
    })
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn channels(&self) -> usize {
    RGB_CHANNELS
  }

  /// 张量形状 `[batch, height, width, channels]`
  pub fn shape(&self) -> [usize; 4] {
    [1, self.height, self.width, RGB_CHANNELS]
  }

  pub fn as_nhwc(&self) -> &[u8] {
    &self.data
  }

  pub fn pixel(&self, row: usize, column: usize) -> [u8; 3] {
    let idx = (row * self.width + column) * RGB_CHANNELS;
    [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
  }
}

impl AsMut<[u8]> for RgbNhwcFrame {
  fn as_mut(&mut self) -> &mut [u8] {
    &mut self.data
  }
}

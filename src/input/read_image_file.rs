// 该文件是 Xunmu （寻目） 项目的一部分。
// src/input/read_image_file.rs - 图像文件输入
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

use std::path::Path;

use image::{DynamicImage, ImageReader, RgbImage};
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, frame::RgbNhwcFrame, url_path};

#[derive(Error, Debug)]
pub enum ImageFileInputError {
  #[error("URI schema mismatch: {0}")]
  SchemaMismatch(String),
  #[error("I/O error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("Image loading error: {0}")]
  ImageLoadError(#[from] image::ImageError),
}

pub struct ImageFileInput {
  image: Option<RgbImage>,
}

impl FromUrlWithScheme for ImageFileInput {
  const SCHEME: &'static str = "image";
}

impl FromUrl for ImageFileInput {
  type Error = ImageFileInputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if !Self::accepts(url) {
      error!(
        "URI scheme mismatch: expected '{}', found '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(ImageFileInputError::SchemaMismatch(url.scheme().to_string()));
    }

    Self::open(url_path(url))
  }
}

impl ImageFileInput {
  pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ImageFileInputError> {
    let path = path.as_ref();
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(
      "读取图像 {}: {}x{}",
      path.display(),
      image.width(),
      image.height()
    );

    Ok(Self::from_image(image))
  }

  /// 丢弃 alpha 通道，统一为 8 位 RGB
  pub fn from_image(image: DynamicImage) -> Self {
    ImageFileInput {
      image: Some(image.to_rgb8()),
    }
  }

  pub fn into_nhwc(self) -> ImageFileInputNhwc {
    ImageFileInputNhwc { inner: self }
  }
}

pub struct ImageFileInputNhwc {
  inner: ImageFileInput,
}

impl Iterator for ImageFileInputNhwc {
  type Item = RgbNhwcFrame;

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.image.take().map(RgbNhwcFrame::from)
  }
}

impl From<RgbImage> for RgbNhwcFrame {
  fn from(image: RgbImage) -> Self {
    RgbNhwcFrame::from(&image)
  }
}

impl From<&RgbImage> for RgbNhwcFrame {
  fn from(image: &RgbImage) -> Self {
    let mut frame = {
      let (width, height) = image.dimensions();
      RgbNhwcFrame::with_shape(height as usize, width as usize)
    };

    let channels = frame.channels();
    let width = frame.width();
    let slice = frame.as_mut();

    for (column, row, pixel) in image.enumerate_pixels() {
      let base = (row as usize * width + column as usize) * channels;
      slice[base..base + channels].copy_from_slice(&pixel.0);
    }
    frame
  }
}

// 该文件是 Xunmu （寻目） 项目的一部分。
// src/output/draw.rs - 目标检测结果可视化
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

use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};

use crate::{
  frame::RgbNhwcFrame,
  model::{BoundingBox, DetectResult},
};

const BOX_COLOR: [u8; 3] = [0, 0, 0]; // 黑色
// 线宽为图像宽度的千分之五
const STROKE_PER_MILLE: u32 = 5;

pub struct Draw {
  box_color: [u8; 3],
  stroke_per_mille: u32,
}

impl Default for Draw {
  fn default() -> Self {
    Self {
      box_color: BOX_COLOR,
      stroke_per_mille: STROKE_PER_MILLE,
    }
  }
}

impl Draw {
  /// 线宽，至少 1 像素
  pub fn stroke_width(&self, image_width: u32) -> u32 {
    (image_width * self.stroke_per_mille / 1000).max(1)
  }

  // 以矩形路径为中心绘制描边，超出图像的部分被裁掉
  fn draw_bbox(&self, image: &mut RgbImage, bbox: &BoundingBox, stroke: u32) {
    // 越界的检测框会饱和到极值，用 i64 计算后再裁剪到图像外一像素
    let x = bbox.x as i64;
    let y = bbox.y as i64;
    let w = (bbox.width + 0.5) as i64;
    let h = (bbox.height + 0.5) as i64;
    let (max_x, max_y) = (image.width() as i64, image.height() as i64);

    let half = (stroke / 2) as i64;
    for t in 0..stroke as i64 {
      let offset = t - half;
      let left = x.saturating_add(offset);
      let top = y.saturating_add(offset);
      let right = x.saturating_add(w).saturating_sub(offset + 1);
      let bottom = y.saturating_add(h).saturating_sub(offset + 1);
      if right < left || bottom < top {
        continue;
      }

      let (left, top) = (left.clamp(-1, max_x), top.clamp(-1, max_y));
      let (right, bottom) = (right.clamp(-1, max_x), bottom.clamp(-1, max_y));
      let rect = Rect::at(left as i32, top as i32)
        .of_size((right - left + 1) as u32, (bottom - top + 1) as u32);
      draw_hollow_rect_mut(image, rect, Rgb(self.box_color));
    }
  }
}

pub trait DrawDetectionOnImage {
  fn draw_detections_on_image(&self, image: &mut RgbImage, result: &DetectResult);
}

pub trait ToRgbImage {
  fn to_rgb_image(&self) -> RgbImage;
}

pub trait DrawDetectionOnFrame<FromFrame> {
  fn draw_detection(&self, frame: &FromFrame, result: &DetectResult) -> RgbImage;
}

impl<FromFrame: ToRgbImage, D: DrawDetectionOnImage> DrawDetectionOnFrame<FromFrame> for D {
  fn draw_detection(&self, frame: &FromFrame, result: &DetectResult) -> RgbImage {
    let mut image = frame.to_rgb_image();
    self.draw_detections_on_image(&mut image, result);
    image
  }
}

impl ToRgbImage for RgbNhwcFrame {
  fn to_rgb_image(&self) -> RgbImage {
    let width = self.width() as u32;
    let height = self.height() as u32;

    ImageBuffer::from_fn(width, height, |x, y| Rgb(self.pixel(y as usize, x as usize)))
  }
}

impl DrawDetectionOnImage for Draw {
  fn draw_detections_on_image(&self, image: &mut RgbImage, result: &DetectResult) {
    let stroke = self.stroke_width(image.width());
    for item in result.items.iter() {
      self.draw_bbox(image, &item.bbox, stroke);
    }
  }
}

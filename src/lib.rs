// 该文件是 Xunmu （寻目） 项目的一部分。
// src/lib.rs - 库主文件
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

use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

pub mod frame;
pub mod input;
pub mod model;
pub mod output;
pub mod task;

/// 本地文件方案，所有 `FromUrl` 实现都接受
pub const FILE_SCHEME: &str = "file";

pub trait FromUrl {
  type Error;
  fn from_url(url: &url::Url) -> Result<Self, Self::Error>
  where
    Self: Sized;
}

pub trait FromUrlWithScheme: FromUrl {
  const SCHEME: &'static str;

  /// 是否接受该 URL 的方案（自身方案或 `file`）
  fn accepts(url: &Url) -> bool {
    url.scheme() == Self::SCHEME || url.scheme() == FILE_SCHEME
  }
}

#[derive(Error, Debug)]
pub enum LocationError {
  #[error("无法解析位置 '{0}': {1}")]
  Parse(String, url::ParseError),
  #[error("无法转换为绝对路径 '{0}': {1}")]
  Absolute(String, std::io::Error),
  #[error("无效的文件路径: {0}")]
  InvalidPath(String),
}

/// 将命令行位置参数解析为 URL
///
/// 带方案的输入（如 `image:///a.jpg`）原样解析；
/// 普通路径转换为 `file://` URL。
pub fn parse_location(location: &str) -> Result<Url, LocationError> {
  match Url::parse(location) {
    // 单字母方案是 Windows 盘符，按路径处理
    Ok(url) if url.scheme().len() > 1 => Ok(url),
    Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
      let absolute = std::path::absolute(Path::new(location))
        .map_err(|e| LocationError::Absolute(location.to_string(), e))?;
      Url::from_file_path(&absolute).map_err(|_| LocationError::InvalidPath(location.to_string()))
    }
    Err(e) => Err(LocationError::Parse(location.to_string(), e)),
  }
}

/// 取出 URL 中的文件路径（百分号解码）
pub fn url_path(url: &Url) -> PathBuf {
  match urlencoding::decode(url.path()) {
    Ok(path) => PathBuf::from(path.into_owned()),
    Err(_) => PathBuf::from(url.path()),
  }
}

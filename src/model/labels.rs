// 该文件是 Xunmu （寻目） 项目的一部分。
// src/model/labels.rs - 类别标签表
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

use std::io::BufRead;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LabelError {
  #[error("无法读取标签文件 [{0}]: {1}")]
  Read(PathBuf, std::io::Error),
}

/// 第 N 行即类别 N 的名称
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
  names: Box<[String]>,
}

impl LabelTable {
  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LabelError> {
    let path = path.as_ref();
    info!("加载标签文件: {}", path.display());
    let file =
      std::fs::File::open(path).map_err(|e| LabelError::Read(path.to_path_buf(), e))?;
    let table = Self::from_reader(std::io::BufReader::new(file))
      .map_err(|e| LabelError::Read(path.to_path_buf(), e))?;
    debug!("标签数量: {}", table.len());
    Ok(table)
  }

  pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, std::io::Error> {
    let names = reader.lines().collect::<Result<Vec<_>, _>>()?;
    Ok(Self {
      names: names.into_boxed_slice(),
    })
  }

  pub fn get(&self, index: usize) -> Option<&str> {
    self.names.get(index).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}

impl<S: Into<String>> FromIterator<S> for LabelTable {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self {
      names: iter.into_iter().map(Into::into).collect(),
    }
  }
}

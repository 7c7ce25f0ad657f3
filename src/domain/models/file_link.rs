// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::extension_set::ExtensionSet;
use std::fmt;

/// 文件链接
///
/// 爬取过程中发现的、扩展名属于跟踪集合的绝对URL。
/// 排序以URL为主键，集合与映射的遍历顺序因此是确定的。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileLink {
    /// 绝对URL
    url: String,
    /// 推断出的扩展名（小写，不含点）
    extension: String,
}

impl FileLink {
    /// 按跟踪扩展名对URL进行分类
    ///
    /// # 返回值
    ///
    /// * `Some(FileLink)` - URL以跟踪的扩展名结尾
    /// * `None` - URL不是需要记录的文件
    pub fn classify(url: &str, tracked: &ExtensionSet) -> Option<Self> {
        tracked.match_url(url).map(|extension| Self {
            url: url.to_string(),
            extension: extension.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// 路径最后一段，用于报告输出
    pub fn file_name(&self) -> &str {
        self.url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.url)
    }
}

impl fmt::Display for FileLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

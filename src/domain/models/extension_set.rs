// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 扩展名集合
///
/// 按配置顺序保存小写扩展名（不含前导点），用于判断URL是否指向需要跟踪的文件。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl ExtensionSet {
    /// 创建扩展名集合
    ///
    /// 输入会被去除首尾空白和前导点并转为小写；空项和重复项会被忽略，
    /// 其余项保持原有顺序。
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();
            if !ext.is_empty() && !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Self {
            extensions: normalized,
        }
    }

    /// 返回URL匹配到的扩展名
    ///
    /// 只比较路径部分（忽略查询串和片段），路径必须以 `.ext` 结尾，大小写不敏感。
    pub fn match_url(&self, url: &str) -> Option<&str> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let (_, suffix) = path.rsplit_once('.')?;
        if suffix.contains('/') {
            return None;
        }
        self.extensions
            .iter()
            .find(|ext| ext.eq_ignore_ascii_case(suffix))
            .map(String::as_str)
    }

    /// 是否包含指定扩展名
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension.trim_start_matches('.')))
    }

    /// 当前集合是否为另一集合的子集
    pub fn is_subset_of(&self, other: &ExtensionSet) -> bool {
        self.extensions.iter().all(|ext| other.contains(ext))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::url_utils::authority;
use url::{ParseError, Url};

/// 迁移的源主机与目标主机
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPair {
    source: String,
    target: String,
}

impl HostPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// 以起始URL的主机（含显式端口）作为源主机
    pub fn from_starting_url(starting_url: &str, target: impl Into<String>) -> Result<Self, ParseError> {
        let url = Url::parse(starting_url)?;
        let source = authority(&url).ok_or(ParseError::EmptyHost)?;
        Ok(Self::new(source, target))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

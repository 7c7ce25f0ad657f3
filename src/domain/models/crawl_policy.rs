// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::extension_set::ExtensionSet;
use crate::utils::url_utils::authority;
use std::collections::HashSet;
use url::Url;

/// 爬取策略
///
/// 显式传入爬虫的配置值：允许访问的主机、需要记录的扩展名以及页面抓取的并发上限。
#[derive(Debug, Clone)]
pub struct CrawlPolicy {
    /// 允许访问的主机（`host` 或 `host:port`）
    allowed_hosts: HashSet<String>,
    /// 需要记录的文件扩展名
    tracked: ExtensionSet,
    /// 同时进行的页面抓取数量上限
    max_concurrency: usize,
}

impl CrawlPolicy {
    pub fn new<I, S>(allowed_hosts: I, tracked: ExtensionSet, max_concurrency: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_hosts: allowed_hosts
                .into_iter()
                .map(|host| host.into().to_ascii_lowercase())
                .collect(),
            tracked,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.crawl.allowed_hosts.iter().cloned(),
            ExtensionSet::new(&settings.verify.tracked_extensions),
            settings.crawl.max_concurrency,
        )
    }

    /// URL的主机是否在允许列表中
    ///
    /// 列表项既可以是裸主机名，也可以是带端口的 `host:port`。
    pub fn is_allowed(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        if self.allowed_hosts.contains(&host.to_ascii_lowercase()) {
            return true;
        }
        authority(url).is_some_and(|auth| self.allowed_hosts.contains(&auth.to_ascii_lowercase()))
    }

    pub fn tracked(&self) -> &ExtensionSet {
        &self.tracked
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}

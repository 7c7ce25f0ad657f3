// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::crawl_policy::CrawlPolicy;
use crate::domain::models::extension_set::ExtensionSet;
use crate::domain::models::file_link::FileLink;
use crate::engines::traits::FetchEngine;
use crate::infrastructure::observability::metrics::{CRAWL_FILES_DISCOVERED, CRAWL_PAGES_VISITED};
use crate::queue::crawl_frontier::CrawlFrontier;
use crate::utils::errors::VerifyError;
use crate::utils::url_utils::resolve_url;
use metrics::counter;
use parking_lot::Mutex;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

/// 上级目录链接的锚文本
const PARENT_DIRECTORY_TEXT: &str = "../";

/// 链接爬虫
///
/// 从起始目录列表页面出发，逐层访问子目录页面，收集所有扩展名属于跟踪集合的文件链接
pub struct LinkCrawler {
    /// 抓取引擎
    engine: Arc<dyn FetchEngine>,
    /// 爬取策略
    policy: CrawlPolicy,
}

impl LinkCrawler {
    pub fn new(engine: Arc<dyn FetchEngine>, policy: CrawlPolicy) -> Self {
        Self { engine, policy }
    }

    /// 爬取起始URL下可达的全部文件链接
    ///
    /// 页面抓取以 `max_concurrency` 为上限并发执行；所有页面（包括过程中新发现的子目录）
    /// 访问完成后才返回。任一页面抓取失败即终止整个爬取，不返回部分结果。
    ///
    /// # 参数
    ///
    /// * `starting_url` - 起始目录列表页面，主机必须在允许列表中
    ///
    /// # 返回值
    ///
    /// * `Ok(BTreeSet<FileLink>)` - 去重后的文件链接集合
    /// * `Err(VerifyError)` - 起始URL无效、主机不被允许或页面抓取失败
    pub async fn crawl(&self, starting_url: &str) -> Result<BTreeSet<FileLink>, VerifyError> {
        let mut start = Url::parse(starting_url)?;
        if !self.policy.is_allowed(&start) {
            return Err(VerifyError::HostNotAllowed(starting_url.to_string()));
        }
        start.set_fragment(None);
        info!(url = %start, engine = self.engine.name(), "Starting crawl");

        let collector = Arc::new(LinkCollector::new());
        let mut frontier = CrawlFrontier::new();
        frontier.push(start.to_string());

        // Dropping the set on an early return aborts the remaining visits.
        let mut in_flight = JoinSet::new();
        loop {
            while in_flight.len() < self.policy.max_concurrency() {
                let Some(page_url) = frontier.pop() else {
                    break;
                };
                let engine = self.engine.clone();
                let tracked = self.policy.tracked().clone();
                let collector = collector.clone();
                in_flight.spawn(async move {
                    visit_page(engine.as_ref(), &page_url, &tracked, &collector).await
                });
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };
            let directories = joined.map_err(|e| VerifyError::TaskJoin(e.to_string()))??;

            for directory in directories {
                if !self.policy.is_allowed(&directory) {
                    debug!(url = %directory, "Skipping link outside allowed hosts");
                    continue;
                }
                frontier.push(directory.to_string());
            }
            debug!(
                pending = frontier.pending(),
                in_flight = in_flight.len(),
                "Page visit complete"
            );
        }

        if collector.is_empty() {
            warn!(url = starting_url, "Crawl finished without finding any tracked files");
        } else {
            info!(
                pages = frontier.seen(),
                files = collector.len(),
                "Crawl finished"
            );
        }
        Ok(collector.take())
    }
}

/// 访问单个目录页面
///
/// 文件链接直接写入收集器，返回需要继续访问的子目录候选
async fn visit_page(
    engine: &dyn FetchEngine,
    page_url: &str,
    tracked: &ExtensionSet,
    collector: &LinkCollector,
) -> Result<Vec<Url>, VerifyError> {
    debug!(url = page_url, "Visiting page");
    counter!(CRAWL_PAGES_VISITED).increment(1);

    let page = engine.fetch_page(page_url).await?;
    if !page.is_success() {
        return Err(VerifyError::PageStatus {
            url: page_url.to_string(),
            status: page.status_code,
        });
    }
    if !page.is_html() {
        debug!(url = page_url, content_type = %page.content_type, "Not a listing page");
        return Ok(Vec::new());
    }

    let links = LinkDiscoverer::extract_links(&page.content, &page.url)?;
    let mut directories = Vec::new();
    for link in links {
        match FileLink::classify(link.as_str(), tracked) {
            Some(file) => {
                let url = file.url().to_string();
                if collector.insert(file) {
                    info!(url = %url, "Found file");
                    counter!(CRAWL_FILES_DISCOVERED).increment(1);
                }
            }
            None => directories.push(link),
        }
    }

    Ok(directories)
}

/// 文件链接收集器
///
/// 并发页面访问共享的只追加容器
#[derive(Debug, Default)]
pub struct LinkCollector {
    links: Mutex<BTreeSet<FileLink>>,
}

impl LinkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加文件链接，已存在时返回false
    pub fn insert(&self, link: FileLink) -> bool {
        self.links.lock().insert(link)
    }

    pub fn len(&self) -> usize {
        self.links.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.lock().is_empty()
    }

    /// 取出全部已收集的链接
    pub fn take(&self) -> BTreeSet<FileLink> {
        std::mem::take(&mut *self.links.lock())
    }
}

/// 链接发现器
///
/// 负责从目录列表页面中提取链接
pub struct LinkDiscoverer;

impl LinkDiscoverer {
    /// 从HTML内容中提取链接
    ///
    /// 锚文本恰好为 `"../"` 的上级目录链接会被忽略，无论其指向何处。
    ///
    /// # 参数
    ///
    /// * `html_content` - HTML内容
    /// * `base_url` - 页面URL，用于解析相对链接
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<Url>)` - 按页面顺序排列的绝对http(s)链接，已去除片段
    /// * `Err(VerifyError)` - 页面URL无法解析
    pub fn extract_links(html_content: &str, base_url: &str) -> Result<Vec<Url>, VerifyError> {
        let document = Html::parse_document(html_content);
        let selector =
            Selector::parse("a").map_err(|e| VerifyError::InvalidSelector(format!("{:?}", e)))?;
        let base = Url::parse(base_url)?;
        let mut links = Vec::new();

        for element in document.select(&selector) {
            let text: String = element.text().collect();
            if text == PARENT_DIRECTORY_TEXT {
                continue;
            }

            let Some(href) = element.value().attr("href") else {
                continue;
            };
            // Ignore fragment identifiers, mailto and javascript links
            if href.starts_with('#') || href.starts_with("mailto:") || href.starts_with("javascript:")
            {
                continue;
            }

            if let Ok(mut url) = resolve_url(&base, href) {
                // Only keep http/https links
                if url.scheme() == "http" || url.scheme() == "https" {
                    url.set_fragment(None);
                    links.push(url);
                }
            }
        }

        Ok(links)
    }
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;

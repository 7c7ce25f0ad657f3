// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 内存站点引擎，供单元测试模拟源站与目标站

use crate::engines::traits::{BodyStream, EngineError, FetchEngine, PageResponse};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub(crate) struct InMemoryEngine {
    pages: HashMap<String, String>,
    files: HashMap<String, Vec<u8>>,
    unreachable: HashSet<String>,
    page_visits: Mutex<HashMap<String, usize>>,
    probes: Mutex<Vec<String>>,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// 请求结束时归还在途计数
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl InMemoryEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 注册一个目录列表页面
    pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// 注册一个文件
    pub(crate) fn with_file(mut self, url: &str, content: &[u8]) -> Self {
        self.files.insert(url.to_string(), content.to_vec());
        self
    }

    /// 对该URL的任何请求都以传输错误失败
    pub(crate) fn with_unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    /// 每个页面请求和探测请求都先等待该时长
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// 同时在途请求数的历史最大值
    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn remove_file(&mut self, url: &str) {
        self.files.remove(url);
    }

    pub(crate) fn visits(&self, url: &str) -> usize {
        self.page_visits.lock().get(url).copied().unwrap_or(0)
    }

    pub(crate) fn total_visits(&self) -> usize {
        self.page_visits.lock().values().sum()
    }

    pub(crate) fn probed(&self) -> Vec<String> {
        self.probes.lock().clone()
    }

    async fn enter(&self) -> InFlight<'_> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        let guard = InFlight(&self.in_flight);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        guard
    }

    fn check_reachable(&self, url: &str) -> Result<(), EngineError> {
        if self.unreachable.contains(url) {
            return Err(EngineError::Other(format!("connection refused: {}", url)));
        }
        Ok(())
    }
}

#[async_trait]
impl FetchEngine for InMemoryEngine {
    async fn fetch_page(&self, url: &str) -> Result<PageResponse, EngineError> {
        *self.page_visits.lock().entry(url.to_string()).or_insert(0) += 1;
        let _in_flight = self.enter().await;
        self.check_reachable(url)?;

        if let Some(html) = self.pages.get(url) {
            return Ok(PageResponse {
                url: url.to_string(),
                status_code: 200,
                content: html.clone(),
                content_type: "text/html; charset=utf-8".to_string(),
            });
        }
        if self.files.contains_key(url) {
            return Ok(PageResponse {
                url: url.to_string(),
                status_code: 200,
                content: String::new(),
                content_type: "application/octet-stream".to_string(),
            });
        }
        Ok(PageResponse {
            url: url.to_string(),
            status_code: 404,
            content: String::new(),
            content_type: "text/html".to_string(),
        })
    }

    async fn probe(&self, url: &str) -> Result<u16, EngineError> {
        self.probes.lock().push(url.to_string());
        let _in_flight = self.enter().await;
        self.check_reachable(url)?;
        Ok(if self.files.contains_key(url) { 200 } else { 404 })
    }

    async fn open_stream(&self, url: &str) -> Result<BodyStream, EngineError> {
        self.check_reachable(url)?;
        let content = self
            .files
            .get(url)
            .cloned()
            .ok_or_else(|| EngineError::UnexpectedStatus {
                url: url.to_string(),
                status: 404,
            })?;

        // Small chunks so digests are computed across several stream items.
        let chunks: Vec<Result<Bytes, EngineError>> = content
            .chunks(3)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();
        Ok(futures::stream::iter(chunks).boxed())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

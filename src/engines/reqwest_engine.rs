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

use crate::config::settings::HttpSettings;
use crate::engines::traits::{BodyStream, EngineError, FetchEngine, PageResponse};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

/// 抓取引擎
///
/// 基于reqwest实现的HTTP引擎，所有请求共享同一个客户端以复用连接
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建新的引擎实例
    ///
    /// # 参数
    ///
    /// * `user_agent` - 请求使用的User-Agent
    /// * `timeout` - 单个请求的超时时间
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_settings(settings: &HttpSettings) -> Result<Self, EngineError> {
        Self::new(
            &settings.user_agent,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }
}

#[async_trait]
impl FetchEngine for ReqwestEngine {
    /// 获取目录列表页面
    ///
    /// 非HTML响应（包括缺少 `Content-Type` 的响应）不读取响应体，避免把未跟踪的大文件整体下载下来。
    async fn fetch_page(&self, url: &str) -> Result<PageResponse, EngineError> {
        let response = self.client.get(url).send().await?;

        let final_url = response.url().to_string();
        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let mut page = PageResponse {
            url: final_url,
            status_code,
            content: String::new(),
            content_type,
        };

        if page.is_success() && page.is_html() {
            page.content = response.text().await?;
        } else {
            debug!(url, status = status_code, content_type = %page.content_type, "Skipping response body");
        }

        Ok(page)
    }

    async fn probe(&self, url: &str) -> Result<u16, EngineError> {
        let response = self.client.head(url).send().await?;
        Ok(response.status().as_u16())
    }

    async fn open_stream(&self, url: &str) -> Result<BodyStream, EngineError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes_stream().map_err(EngineError::from).boxed())
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

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

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非成功状态码
    #[error("Unexpected status {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 目录列表页面响应
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// 最终URL（跟随重定向后）
    pub url: String,
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容，非HTML响应为空
    pub content: String,
    /// 内容类型
    pub content_type: String,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// 是否为可解析的HTML页面
    pub fn is_html(&self) -> bool {
        let content_type = self.content_type.to_ascii_lowercase();
        content_type.contains("text/html") || content_type.contains("application/xhtml")
    }
}

/// 响应体字节流
pub type BodyStream = BoxStream<'static, Result<Bytes, EngineError>>;

/// 抓取引擎特质
///
/// 爬虫与校验器访问网络的唯一入口，测试中可替换为内存实现或mock。
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 获取目录列表页面
    async fn fetch_page(&self, url: &str) -> Result<PageResponse, EngineError>;

    /// 发送不传输响应体的存在性探测，返回状态码
    async fn probe(&self, url: &str) -> Result<u16, EngineError>;

    /// 打开响应体流
    ///
    /// 非成功状态码返回 `EngineError::UnexpectedStatus`。
    async fn open_stream(&self, url: &str) -> Result<BodyStream, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

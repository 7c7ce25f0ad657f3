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

use crate::engines::traits::{BodyStream, EngineError, FetchEngine};
use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};

/// 校验和服务
///
/// 以流的方式把远程资源的响应体送入SHA-256，不在内存中保留完整文件
#[derive(Clone)]
pub struct ChecksumService {
    engine: Arc<dyn FetchEngine>,
}

impl ChecksumService {
    pub fn new(engine: Arc<dyn FetchEngine>) -> Self {
        Self { engine }
    }

    /// 计算远程资源的校验和
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 小写十六进制摘要
    /// * `Err(EngineError)` - 无法建立请求、状态码非成功或读取中断
    pub async fn checksum(&self, url: &str) -> Result<String, EngineError> {
        let stream = self.engine.open_stream(url).await?;
        let digest = Self::digest_stream(stream).await?;
        debug!(url, digest = %digest, "Computed checksum");
        Ok(digest)
    }

    /// 消费字节流并返回十六进制摘要
    pub async fn digest_stream(mut stream: BodyStream) -> Result<String, EngineError> {
        let mut hasher = Sha256::new();
        while let Some(chunk) = stream.next().await {
            hasher.update(&chunk?);
        }
        Ok(hex::encode(hasher.finalize()))
    }

    /// 比较两个URL的内容是否一致
    ///
    /// 任意一端获取失败都返回false：无法证明一致即视为不一致。
    pub async fn same_checksum(&self, source_url: &str, target_url: &str) -> bool {
        let source = match self.checksum(source_url).await {
            Ok(digest) => digest,
            Err(e) => {
                warn!(url = source_url, error = %e, "Failed to checksum source file");
                return false;
            }
        };

        let target = match self.checksum(target_url).await {
            Ok(digest) => digest,
            Err(e) => {
                warn!(url = target_url, error = %e, "Failed to checksum target file");
                return false;
            }
        };

        source == target
    }
}

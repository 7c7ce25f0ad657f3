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

use crate::domain::models::file_link::FileLink;
use crate::domain::models::verification::{ExistenceReport, ProbeOutcome};
use crate::engines::traits::FetchEngine;
use crate::infrastructure::observability::metrics::{EXISTENCE_NOT_FOUND, EXISTENCE_PROBES};
use crate::utils::url_utils::rewrite_to_host;
use metrics::counter;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// 存在性校验器
///
/// 对每个文件链接在目标主机上发送HEAD探测，统计未找到的文件
pub struct ExistenceVerifier {
    /// 抓取引擎
    engine: Arc<dyn FetchEngine>,
    /// 探测并发许可
    permits: Arc<Semaphore>,
}

impl ExistenceVerifier {
    /// 创建新的存在性校验器
    ///
    /// # 参数
    ///
    /// * `engine` - 抓取引擎
    /// * `probe_concurrency` - 同时进行的探测数量上限
    pub fn new(engine: Arc<dyn FetchEngine>, probe_concurrency: usize) -> Self {
        Self {
            engine,
            permits: Arc::new(Semaphore::new(probe_concurrency.max(1))),
        }
    }

    /// 探测所有链接并返回逐条结果
    ///
    /// 每个链接一个任务，全部完成后才返回。
    pub async fn probe_all(&self, links: &BTreeSet<FileLink>, target_host: &str) -> ExistenceReport {
        let mut tasks = JoinSet::new();
        for link in links {
            let engine = self.engine.clone();
            let permits = self.permits.clone();
            let link = link.clone();
            let target_host = target_host.to_string();
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                let outcome = probe_link(engine.as_ref(), &link, &target_host).await;
                (link, outcome)
            });
        }

        let mut report = ExistenceReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((link, outcome)) => report.record(link, outcome),
                Err(e) => {
                    error!(error = %e, "Existence probe task aborted");
                    report.record_lost();
                }
            }
        }

        counter!(EXISTENCE_PROBES).increment(report.checked() as u64);
        counter!(EXISTENCE_NOT_FOUND).increment(report.not_found_count() as u64);
        info!(
            checked = report.checked(),
            not_found = report.not_found_count(),
            target_host,
            "Existence check finished"
        );
        report
    }

    /// 返回目标主机上未找到的文件数量
    pub async fn verify_existence(&self, links: &BTreeSet<FileLink>, target_host: &str) -> usize {
        self.probe_all(links, target_host).await.not_found_count()
    }
}

/// 探测单个文件在目标主机上是否存在
async fn probe_link(engine: &dyn FetchEngine, link: &FileLink, target_host: &str) -> ProbeOutcome {
    let target_url = match rewrite_to_host(link.url(), target_host) {
        Ok(url) => url,
        Err(e) => {
            warn!(url = link.url(), error = %e, "Cannot rewrite URL for target host");
            return ProbeOutcome::Failed(e.to_string());
        }
    };

    debug!(url = %target_url, "Checking");
    match engine.probe(&target_url).await {
        Ok(status) if (200..300).contains(&status) => ProbeOutcome::Found,
        Ok(status) => {
            warn!(url = %target_url, status, "File not found on target host");
            ProbeOutcome::Missing(status)
        }
        Err(e) => {
            warn!(url = %target_url, error = %e, "Existence probe failed");
            ProbeOutcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "existence_verifier_test.rs"]
mod tests;

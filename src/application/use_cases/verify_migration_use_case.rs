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

use crate::config::settings::Settings;
use crate::domain::models::crawl_policy::CrawlPolicy;
use crate::domain::models::host_pair::HostPair;
use crate::domain::models::verification::MigrationReport;
use crate::domain::services::checksum_service::ChecksumService;
use crate::domain::services::crawl_service::LinkCrawler;
use crate::domain::services::deep_verifier::DeepVerifier;
use crate::domain::services::existence_verifier::ExistenceVerifier;
use crate::engines::traits::FetchEngine;
use crate::utils::errors::VerifyError;
use std::sync::Arc;
use tracing::info;

/// 迁移校验用例
///
/// 三个阶段严格串行：爬取完成后才开始存在性校验，存在性校验完成后才开始深度校验
pub struct VerifyMigrationUseCase {
    starting_url: String,
    hosts: HostPair,
    crawler: LinkCrawler,
    existence: ExistenceVerifier,
    deep: DeepVerifier,
}

impl VerifyMigrationUseCase {
    pub fn new(
        starting_url: impl Into<String>,
        hosts: HostPair,
        crawler: LinkCrawler,
        existence: ExistenceVerifier,
        deep: DeepVerifier,
    ) -> Self {
        Self {
            starting_url: starting_url.into(),
            hosts,
            crawler,
            existence,
            deep,
        }
    }

    /// 根据配置组装完整流程
    ///
    /// # 参数
    ///
    /// * `settings` - 应用程序配置
    /// * `engine` - 各阶段共享的抓取引擎
    pub fn from_settings(
        settings: &Settings,
        engine: Arc<dyn FetchEngine>,
    ) -> Result<Self, VerifyError> {
        let hosts = HostPair::from_starting_url(
            &settings.crawl.starting_url,
            settings.verify.target_host.clone(),
        )?;

        Ok(Self::new(
            settings.crawl.starting_url.clone(),
            hosts,
            LinkCrawler::new(engine.clone(), CrawlPolicy::from_settings(settings)),
            ExistenceVerifier::new(engine.clone(), settings.verify.probe_concurrency),
            DeepVerifier::new(
                ChecksumService::new(engine),
                settings.deep_check_extensions(),
            ),
        ))
    }

    /// 执行迁移校验
    ///
    /// # 返回值
    ///
    /// * `Ok(MigrationReport)` - 三个阶段的汇总结果
    /// * `Err(VerifyError)` - 爬取阶段失败，不返回部分结果
    pub async fn execute(&self) -> Result<MigrationReport, VerifyError> {
        info!(
            starting_url = %self.starting_url,
            source = self.hosts.source(),
            target_host = self.hosts.target(),
            "Starting migration check"
        );

        let file_links = self.crawler.crawl(&self.starting_url).await?;
        info!(files = file_links.len(), "Crawl phase complete");

        let existence = self
            .existence
            .probe_all(&file_links, self.hosts.target())
            .await;

        let deep_check = self.deep.deep_verify(&file_links, self.hosts.target()).await;

        Ok(MigrationReport {
            hosts: self.hosts.clone(),
            file_links,
            existence,
            deep_check,
        })
    }
}

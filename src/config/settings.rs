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

use crate::domain::models::extension_set::ExtensionSet;
use crate::utils::url_utils::validate_target_host;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

/// 应用程序配置设置
///
/// 包含爬取、校验和HTTP客户端的全部配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 爬取配置
    pub crawl: CrawlSettings,
    /// 校验配置
    pub verify: VerifySettings,
    /// HTTP客户端配置
    pub http: HttpSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 爬取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 起始目录列表页面
    pub starting_url: String,
    /// 允许访问的主机（`host` 或 `host:port`）
    pub allowed_hosts: Vec<String>,
    /// 页面抓取并发上限
    pub max_concurrency: usize,
}

/// 校验配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct VerifySettings {
    /// 迁移后的目标主机
    pub target_host: String,
    /// 需要记录并做存在性校验的扩展名
    pub tracked_extensions: Vec<String>,
    /// 需要下载并比对校验和的扩展名，必须是 `tracked_extensions` 的子集
    pub deep_check_extensions: Vec<String>,
    /// 存在性探测并发上限
    pub probe_concurrency: usize,
}

/// HTTP客户端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// User-Agent
    pub user_agent: String,
    /// 请求超时时间（秒）
    pub request_timeout_secs: u64,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 运行结束时把指标快照以Prometheus文本格式输出到标准输出
    pub render_on_exit: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}` 以及
    /// `MIRRORCHECK__` 前缀的环境变量。列表类环境变量以逗号分隔。
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Crawl defaults
            .set_default(
                "crawl.starting_url",
                "https://pantry.learningequality.org/downloads",
            )?
            .set_default(
                "crawl.allowed_hosts",
                vec![
                    "pantry.learningequality.org",
                    "pantry-new.learningequality.org",
                ],
            )?
            .set_default("crawl.max_concurrency", 8)?
            // Verification defaults
            .set_default("verify.target_host", "pantry-new.learningequality.org")?
            .set_default(
                "verify.tracked_extensions",
                vec!["pdf", "deb", "exe", "zip", "pex", "torrent", "img"],
            )?
            .set_default(
                "verify.deep_check_extensions",
                vec!["pdf", "deb", "pex", "zip", "torrent"],
            )?
            .set_default("verify.probe_concurrency", 256)?
            // HTTP defaults
            .set_default("http.user_agent", "amipantryenoughscraper/0.1")?
            .set_default("http.request_timeout_secs", 60)?
            // Metrics defaults
            .set_default("metrics.render_on_exit", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("MIRRORCHECK")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("crawl.allowed_hosts")
                    .with_list_parse_key("verify.tracked_extensions")
                    .with_list_parse_key("verify.deep_check_extensions")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 校验配置的一致性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let start = Url::parse(&self.crawl.starting_url).map_err(|e| {
            ConfigError::Message(format!(
                "invalid crawl.starting_url {}: {}",
                self.crawl.starting_url, e
            ))
        })?;
        if start.host_str().is_none() {
            return Err(ConfigError::Message(
                "crawl.starting_url has no host".to_string(),
            ));
        }

        validate_target_host(&self.verify.target_host).map_err(|e| {
            ConfigError::Message(format!(
                "verify.target_host must be a bare host or host:port, got {:?}: {}",
                self.verify.target_host, e
            ))
        })?;

        let tracked = self.tracked_extensions();
        if tracked.is_empty() {
            return Err(ConfigError::Message(
                "verify.tracked_extensions must not be empty".to_string(),
            ));
        }
        if !self.deep_check_extensions().is_subset_of(&tracked) {
            return Err(ConfigError::Message(
                "verify.deep_check_extensions must be a subset of verify.tracked_extensions"
                    .to_string(),
            ));
        }

        if self.crawl.max_concurrency == 0 || self.verify.probe_concurrency == 0 {
            return Err(ConfigError::Message(
                "concurrency limits must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn tracked_extensions(&self) -> ExtensionSet {
        ExtensionSet::new(&self.verify.tracked_extensions)
    }

    pub fn deep_check_extensions(&self) -> ExtensionSet {
        ExtensionSet::new(&self.verify.deep_check_extensions)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

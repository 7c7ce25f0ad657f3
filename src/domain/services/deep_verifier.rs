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
use crate::domain::models::file_link::FileLink;
use crate::domain::services::checksum_service::ChecksumService;
use crate::infrastructure::observability::metrics::{DEEP_CHECKS, DEEP_CHECK_MISMATCHES};
use crate::utils::url_utils::rewrite_to_host;
use metrics::counter;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// 深度校验器
///
/// 为每种深度校验扩展名抽取一个代表文件，分别从源主机和目标主机下载并比对校验和
pub struct DeepVerifier {
    /// 校验和服务
    checksums: ChecksumService,
    /// 需要深度校验的扩展名
    deep_check: ExtensionSet,
}

impl DeepVerifier {
    pub fn new(checksums: ChecksumService, deep_check: ExtensionSet) -> Self {
        Self {
            checksums,
            deep_check,
        }
    }

    /// 选择代表文件
    ///
    /// 每个扩展名至多选一个：按URL字典序遍历，取第一个匹配的链接；
    /// 没有该扩展名的链接时不选。
    ///
    /// # 返回值
    ///
    /// 扩展名到代表文件的映射
    pub fn choose_representatives(
        links: &BTreeSet<FileLink>,
        deep_check: &ExtensionSet,
    ) -> BTreeMap<String, FileLink> {
        let mut chosen: BTreeMap<String, FileLink> = BTreeMap::new();
        for link in links {
            if let Some(extension) = deep_check.match_url(link.url()) {
                chosen
                    .entry(extension.to_string())
                    .or_insert_with(|| link.clone());
            }
            if chosen.len() == deep_check.len() {
                break;
            }
        }
        chosen
    }

    /// 对代表文件逐个比对源主机与目标主机的内容
    ///
    /// 任一端获取失败的文件记为不一致，不向上传播错误。
    ///
    /// # 返回值
    ///
    /// 代表文件到是否一致的映射
    pub async fn deep_verify(
        &self,
        links: &BTreeSet<FileLink>,
        target_host: &str,
    ) -> BTreeMap<FileLink, bool> {
        let representatives = Self::choose_representatives(links, &self.deep_check);
        let mut results = BTreeMap::new();

        for (extension, link) in representatives {
            info!(url = link.url(), extension = %extension, "Deep checking");
            let matched = match rewrite_to_host(link.url(), target_host) {
                Ok(target_url) => self.checksums.same_checksum(link.url(), &target_url).await,
                Err(e) => {
                    warn!(url = link.url(), error = %e, "Cannot rewrite URL for target host");
                    false
                }
            };

            counter!(DEEP_CHECKS).increment(1);
            if !matched {
                counter!(DEEP_CHECK_MISMATCHES).increment(1);
                warn!(url = link.url(), "Checksum mismatch");
            }
            results.insert(link, matched);
        }

        results
    }
}

#[cfg(test)]
#[path = "deep_verifier_test.rs"]
mod tests;

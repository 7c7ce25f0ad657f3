// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::file_link::FileLink;
use crate::domain::models::host_pair::HostPair;
use std::collections::{BTreeMap, BTreeSet};

/// 存在性探测结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 目标主机返回成功状态
    Found,
    /// 目标主机返回非成功状态码
    Missing(u16),
    /// 无法完成探测（URL改写失败或传输错误）
    Failed(String),
}

impl ProbeOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ProbeOutcome::Found)
    }
}

/// 存在性校验报告
#[derive(Debug, Clone, Default)]
pub struct ExistenceReport {
    outcomes: BTreeMap<FileLink, ProbeOutcome>,
    /// 异常终止、无法对应到具体链接的探测任务数
    lost: usize,
}

impl ExistenceReport {
    pub fn record(&mut self, link: FileLink, outcome: ProbeOutcome) {
        self.outcomes.insert(link, outcome);
    }

    pub fn record_lost(&mut self) {
        self.lost += 1;
    }

    /// 已完成探测的链接数量
    pub fn checked(&self) -> usize {
        self.outcomes.len() + self.lost
    }

    /// 目标主机上未找到的文件数量
    pub fn not_found_count(&self) -> usize {
        self.outcomes.values().filter(|o| !o.is_found()).count() + self.lost
    }

    pub fn not_found(&self) -> impl Iterator<Item = (&FileLink, &ProbeOutcome)> {
        self.outcomes.iter().filter(|(_, o)| !o.is_found())
    }

    pub fn outcome(&self, link: &FileLink) -> Option<&ProbeOutcome> {
        self.outcomes.get(link)
    }
}

/// 一次完整迁移校验的汇总结果
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub hosts: HostPair,
    /// 源站上发现的全部文件
    pub file_links: BTreeSet<FileLink>,
    pub existence: ExistenceReport,
    /// 抽样文件的校验和比对结果
    pub deep_check: BTreeMap<FileLink, bool>,
}

impl MigrationReport {
    /// 校验和不一致（或无法比对）的抽样文件
    pub fn mismatches(&self) -> impl Iterator<Item = &FileLink> {
        self.deep_check
            .iter()
            .filter(|(_, matched)| !**matched)
            .map(|(link, _)| link)
    }
}

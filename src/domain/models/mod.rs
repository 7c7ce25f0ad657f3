// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了迁移校验的核心数据结构，包括：
/// - 爬取策略（crawl_policy）：主机允许列表、跟踪扩展名与并发上限
/// - 扩展名集合（extension_set）：按后缀识别需要记录的文件
/// - 文件链接（file_link）：爬取阶段发现的待校验文件
/// - 主机对（host_pair）：迁移前后的主机及URL改写
/// - 校验结果（verification）：存在性与内容校验的结果
pub mod crawl_policy;
pub mod extension_set;
pub mod file_link;
pub mod host_pair;
pub mod verification;

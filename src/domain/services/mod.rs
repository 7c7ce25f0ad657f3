// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 校验和服务（checksum_service）：流式计算远程文件摘要
/// - 爬取服务（crawl_service）：遍历目录列表页面、收集文件链接
/// - 深度校验（deep_verifier）：抽样比对源站与目标站的文件内容
/// - 存在性校验（existence_verifier）：在目标主机上探测每个文件
pub mod checksum_service;
pub mod crawl_service;
pub mod deep_verifier;
pub mod existence_verifier;

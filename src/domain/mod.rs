// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含迁移校验的核心业务逻辑，包括：
/// - 领域模型（models）：文件链接、扩展名集合、主机对与校验结果
/// - 服务（services）：爬取、存在性校验、深度校验与校验和计算
///
/// 领域层只通过 `FetchEngine` 特质访问网络，不依赖具体的HTTP实现。
pub mod models;
pub mod services;

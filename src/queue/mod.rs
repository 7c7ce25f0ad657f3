// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供爬取前沿：待访问页面的工作队列与去重集合
pub mod crawl_frontier;

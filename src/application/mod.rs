// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 将领域服务按“爬取 → 存在性校验 → 深度校验”的顺序编排成完整流程
pub mod use_cases;

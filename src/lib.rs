// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 编排爬取与两阶段校验的完整流程
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含文件链接、爬取策略等核心实体以及爬取与校验服务
pub mod domain;

/// 引擎模块
///
/// 抓取引擎特质及基于reqwest的实现
pub mod engines;

/// 基础设施模块
///
/// 提供指标等可观测性支持
pub mod infrastructure;

/// 队列模块
///
/// 爬取前沿的工作队列
pub mod queue;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

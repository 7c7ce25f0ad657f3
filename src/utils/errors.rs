// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::EngineError;
use thiserror::Error;

/// 校验流程错误类型
///
/// 只有爬取阶段的错误会向上传播并终止运行；存在性探测与内容比对的失败
/// 作为业务结果记录，不使用该类型。
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("传输错误: {0}")]
    Transport(#[from] EngineError),

    #[error("URL解析错误: {0}")]
    Parse(#[from] url::ParseError),

    #[error("主机不在允许列表中: {0}")]
    HostNotAllowed(String),

    #[error("页面返回非成功状态 {status}: {url}")]
    PageStatus { url: String, status: u16 },

    #[error("无效的选择器: {0}")]
    InvalidSelector(String),

    #[error("任务异常终止: {0}")]
    TaskJoin(String),
}

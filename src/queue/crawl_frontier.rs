// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::{HashSet, VecDeque};

/// 爬取前沿
///
/// 待访问URL的先进先出队列加上已见URL集合。URL只在第一次入队时被接受，
/// 因此同一URL至多被访问一次。
#[derive(Debug, Default)]
pub struct CrawlFrontier {
    /// 待访问队列
    pending: VecDeque<String>,
    /// 已入队过的URL
    seen: HashSet<String>,
}

impl CrawlFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 将URL加入队列
    ///
    /// # 返回值
    ///
    /// 首次出现返回true；已入队或已访问过返回false
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.pending.push_back(url);
        true
    }

    /// 取出下一个待访问URL
    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// 队列中等待访问的URL数量
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// 累计接受过的URL数量
    pub fn seen(&self) -> usize {
        self.seen.len()
    }
}

// ==========================================
// 问答系统数据访问层 - 回复树 (arena)
// ==========================================
// 回复按 id 存放在 arena 中，父子关系只用 id 表达，不持有引用
// 构建时检测 parent_id 环
// ==========================================

use crate::domain::reply::Reply;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

/// 回复树构建错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyTreeError {
    #[error("回复 id 重复: {0}")]
    DuplicateId(i64),

    #[error("parent_id 存在环: {0:?}")]
    Cycle(Vec<i64>),
}

// ==========================================
// ReplyTree - 单个问题下的回复森林
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ReplyTree {
    nodes: BTreeMap<i64, Reply>,
    children: HashMap<i64, Vec<i64>>,
    roots: Vec<i64>,
    orphans: Vec<i64>,
}

impl ReplyTree {
    /// 由回复列表构建回复树
    ///
    /// # 规则
    /// - parent_id 为 null: 顶层回复
    /// - parent_id 指向列表外的回复: 记为孤儿，同时按根处理
    /// - parent_id 链出现环: 返回 ReplyTreeError::Cycle
    pub fn from_replies(replies: Vec<Reply>) -> Result<Self, ReplyTreeError> {
        let mut nodes = BTreeMap::new();
        for reply in replies {
            let id = reply.id;
            if nodes.insert(id, reply).is_some() {
                return Err(ReplyTreeError::DuplicateId(id));
            }
        }

        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut roots = Vec::new();
        let mut orphans = Vec::new();

        // BTreeMap 迭代保证子节点按 id 升序
        for (id, reply) in &nodes {
            match reply.parent_id {
                None => roots.push(*id),
                Some(parent) if nodes.contains_key(&parent) => {
                    children.entry(parent).or_default().push(*id);
                }
                Some(_) => {
                    orphans.push(*id);
                    roots.push(*id);
                }
            }
        }

        let tree = Self {
            nodes,
            children,
            roots,
            orphans,
        };
        tree.check_cycles()?;
        Ok(tree)
    }

    /// 检测环: 从每个节点沿 parent_id 上溯，遇到当前路径上的节点即为环
    fn check_cycles(&self) -> Result<(), ReplyTreeError> {
        let mut cleared: HashSet<i64> = HashSet::new();

        for &start in self.nodes.keys() {
            let mut path: Vec<i64> = Vec::new();
            let mut on_path: HashSet<i64> = HashSet::new();
            let mut current = Some(start);

            while let Some(id) = current {
                if cleared.contains(&id) {
                    break;
                }
                if !on_path.insert(id) {
                    let pos = path.iter().position(|&p| p == id).unwrap_or(0);
                    return Err(ReplyTreeError::Cycle(path[pos..].to_vec()));
                }
                path.push(id);
                current = self.parent_id_in_tree(id);
            }

            cleared.extend(path);
        }

        Ok(())
    }

    fn parent_id_in_tree(&self, id: i64) -> Option<i64> {
        self.nodes
            .get(&id)
            .and_then(|r| r.parent_id)
            .filter(|p| self.nodes.contains_key(p))
    }

    pub fn get(&self, id: i64) -> Option<&Reply> {
        self.nodes.get(&id)
    }

    /// 顶层回复 (含孤儿)，按 id 升序
    pub fn roots(&self) -> Vec<&Reply> {
        self.roots.iter().filter_map(|id| self.nodes.get(id)).collect()
    }

    /// 直接子回复，按 id 升序
    pub fn children_of(&self, id: i64) -> Vec<&Reply> {
        self.children
            .get(&id)
            .map(|ids| ids.iter().filter_map(|c| self.nodes.get(c)).collect())
            .unwrap_or_default()
    }

    /// 树内的上级回复
    pub fn parent_of(&self, id: i64) -> Option<&Reply> {
        self.parent_id_in_tree(id).and_then(|p| self.nodes.get(&p))
    }

    /// 由近及远的所有上级回复
    pub fn ancestors(&self, id: i64) -> Vec<&Reply> {
        let mut result = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(reply) = current {
            result.push(reply);
            current = self.parent_of(reply.id);
        }
        result
    }

    /// 深度 (顶层回复为 0)；id 不在树中时返回 None
    pub fn depth(&self, id: i64) -> Option<usize> {
        self.nodes.get(&id).map(|_| self.ancestors(id).len())
    }

    /// parent_id 指向本树以外回复的节点
    pub fn orphans(&self) -> Vec<&Reply> {
        self.orphans.iter().filter_map(|id| self.nodes.get(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

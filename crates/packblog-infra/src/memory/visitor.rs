//! In-memory visitor repository.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use packblog_core::domain::{Visitor, VisitorQuery, VisitorStats, is_listable_country};
use packblog_core::error::RepoError;
use packblog_core::ports::VisitorRepository;

/// Visitors held in a Vec. Nothing in this service writes visitors, so the
/// only way in is [`InMemoryVisitorRepository::with_visitors`] or
/// [`InMemoryVisitorRepository::record`].
pub struct InMemoryVisitorRepository {
    visitors: RwLock<Vec<Visitor>>,
}

impl InMemoryVisitorRepository {
    pub fn new() -> Self {
        Self::with_visitors(Vec::new())
    }

    pub fn with_visitors(visitors: Vec<Visitor>) -> Self {
        Self {
            visitors: RwLock::new(visitors),
        }
    }

    pub async fn record(&self, visitor: Visitor) {
        self.visitors.write().await.push(visitor);
    }
}

impl Default for InMemoryVisitorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisitorRepository for InMemoryVisitorRepository {
    async fn list(&self, query: &VisitorQuery, limit: u64) -> Result<Vec<Visitor>, RepoError> {
        let visitors = self.visitors.read().await;
        let mut matching: Vec<Visitor> = visitors
            .iter()
            .filter(|v| query.matches(v))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.visited_at.cmp(&a.visited_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn countries(&self) -> Result<Vec<String>, RepoError> {
        let visitors = self.visitors.read().await;
        let countries: BTreeSet<&str> = visitors
            .iter()
            .map(|v| v.country.as_deref())
            .filter(|c| is_listable_country(*c))
            .flatten()
            .collect();
        Ok(countries.into_iter().map(String::from).collect())
    }

    async fn stats(&self) -> Result<VisitorStats, RepoError> {
        let visitors = self.visitors.read().await;
        Ok(VisitorStats {
            total: visitors.len() as u64,
            with_email: visitors.iter().filter(|v| v.email.is_some()).count() as u64,
            cookies_accepted: visitors.iter().filter(|v| v.cookies_accepted).count() as u64,
        })
    }
}

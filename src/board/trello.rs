//! Trello REST implementation of the board gateway.
//!
//! One GET per snapshot, one GET per comment page, one PUT per due-date
//! change. Credentials are validated at construction so a misconfigured
//! deployment fails loudly instead of serving an empty board.

use std::collections::HashSet;

use jiff::Timestamp;
use reqwest::blocking::Client;

use crate::config::Config;
use crate::model::{BoardSnapshot, CommentAction};

use super::{BoardError, BoardGateway, Result};

const API_BASE: &str = "https://api.trello.com/1";

/// Trello-backed board gateway.
pub struct TrelloGateway {
    client: Client,
    board_id: String,
    key: String,
    token: String,
}

impl TrelloGateway {
    /// Build a gateway from config, rejecting missing credentials up front.
    pub fn new(config: &Config) -> Result<Self> {
        let mut missing = Vec::new();
        if config.board_id.is_empty() {
            missing.push("board-id");
        }
        if config.api_key.is_empty() {
            missing.push("api-key");
        }
        if config.api_token.is_empty() {
            missing.push("api-token");
        }
        if !missing.is_empty() {
            return Err(BoardError::MissingConfig(missing));
        }

        Ok(Self {
            client: Client::new(),
            board_id: config.board_id.clone(),
            key: config.api_key.clone(),
            token: config.api_token.clone(),
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let body = self
            .client
            .get(url)
            .query(&[("key", self.key.as_str()), ("token", self.token.as_str())])
            .query(query)
            .send()?
            .error_for_status()?
            .text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn set_due(&self, card_id: &str, due: Option<Timestamp>) -> Result<()> {
        let url = format!("{API_BASE}/cards/{card_id}/due");
        let value = due.map(|due| due.to_string()).unwrap_or_default();
        self.client
            .put(url)
            .query(&[("key", self.key.as_str()), ("token", self.token.as_str())])
            .query(&[("value", value.as_str())])
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// Drop cards whose list is closed; a snapshot reflects open lists only.
    fn filter_to_open_lists(snapshot: &mut BoardSnapshot) {
        let open: HashSet<String> = snapshot.lists.iter().map(|list| list.id.clone()).collect();
        snapshot.cards.retain(|card| open.contains(&card.id_list));
    }
}

impl BoardGateway for TrelloGateway {
    fn fetch_snapshot(&self) -> Result<BoardSnapshot> {
        let url = format!("{API_BASE}/boards/{}", self.board_id);
        let mut snapshot: BoardSnapshot = self.get_json(
            &url,
            &[
                ("cards", "open"),
                ("card_customFieldItems", "true"),
                ("lists", "open"),
                ("fields", "all"),
                ("customFields", "true"),
                ("members", "all"),
                ("labels", "all"),
            ],
        )?;
        Self::filter_to_open_lists(&mut snapshot);
        Ok(snapshot)
    }

    fn fetch_comment_page(&self, before: Option<&str>, limit: usize) -> Result<Vec<CommentAction>> {
        let url = format!("{API_BASE}/boards/{}/actions", self.board_id);
        let limit = limit.to_string();
        let mut query = vec![("filter", "commentCard"), ("limit", limit.as_str())];
        if let Some(before) = before {
            query.push(("before", before));
        }
        self.get_json(&url, &query)
    }

    fn plan_stop(&self, card_id: &str, due: Timestamp) -> Result<()> {
        self.set_due(card_id, Some(due))
    }

    fn remove_stop(&self, card_id: &str) -> Result<()> {
        self.set_due(card_id, None)
    }

    fn reorder_stops(&self, updates: &[(String, Timestamp)]) -> Result<()> {
        for (card_id, due) in updates {
            self.set_due(card_id, Some(*due))?;
        }
        Ok(())
    }
}

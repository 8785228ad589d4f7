/*!
 * Database module for the local flashcard deck.
 *
 * This module provides SQLite-based persistence for created flashcards:
 * a single `flashcards` table with an idempotent, versioned schema.
 */

// Allow dead code - database types are for library consumers
#![allow(dead_code)]

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::FlashcardRecord;
pub use repository::Repository;

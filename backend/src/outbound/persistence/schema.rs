//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! SQLite has no native timestamp type; Diesel's `Timestamp` and `Date`
//! columns are stored as ISO-8601 text, which sorts chronologically.

diesel::table! {
    /// Registered users. `username` is unique and case-sensitive.
    users (id) {
        id -> Integer,
        username -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Personal goals, deleted only by their owner.
    goals (id) {
        id -> Integer,
        user_id -> Integer,
        name -> Text,
        target -> Nullable<Text>,
        notes -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Activity measurements. `value` holds the submitted number as text and
    /// `shared` is one of `none`, `friends` or `community`.
    records (id) {
        id -> Integer,
        user_id -> Integer,
        date -> Date,
        activity -> Text,
        value -> Text,
        created_at -> Timestamp,
        shared -> Text,
    }
}

diesel::table! {
    /// Friend links. A unique expression index on
    /// `(min(user_id, friend_id), max(user_id, friend_id))` keeps one row per
    /// unordered pair.
    friends (id) {
        id -> Integer,
        user_id -> Integer,
        friend_id -> Integer,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Posts. `visibility` is `friends` or `community`.
    posts (id) {
        id -> Integer,
        user_id -> Integer,
        content -> Text,
        visibility -> Text,
        created_at -> Timestamp,
    }
}

diesel::joinable!(goals -> users (user_id));
diesel::joinable!(posts -> users (user_id));
diesel::joinable!(records -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(friends, goals, posts, records, users);

// Hand-maintained to match migrations/2024-01-01-000000_init; kept in the
// teacher's generated-schema style (one `diesel::table!` block per table).

diesel::table! {
    players (player_id) {
        player_id -> Text,
        name -> Text,
        level -> Double,
        ball_bringer_count_singles -> BigInt,
        ball_bringer_count_doubles -> BigInt,
        chat_user_id -> Nullable<Text>,
        chat_display_name -> Nullable<Text>,
    }
}

diesel::table! {
    matches (match_id) {
        match_id -> Text,
        owner_id -> Text,
        owner_name -> Text,
        start -> BigInt,
        match_end -> BigInt,
        created_at -> BigInt,
        status -> Text,
        game_status -> Text,
        results_status -> Text,
        resource_name -> Text,
        access_code -> Nullable<Text>,
        price -> Nullable<Double>,
        tenant_id -> Text,
        tenant_name -> Text,
        match_type_enum -> Nullable<Text>,
        processing_status -> Text,
        ball_bringer_id -> Nullable<Text>,
        ball_bringer_name -> Nullable<Text>,
        booking_notified_ts -> Nullable<BigInt>,
        result_notified_ts -> Nullable<BigInt>,
        teams_blob -> Binary,
        results_blob -> Binary,
    }
}

diesel::table! {
    player_stats_singles (player_id) {
        player_id -> Text,
        matches_played -> BigInt,
        matches_won -> BigInt,
        matches_lost -> BigInt,
        sets_won -> BigInt,
        sets_lost -> BigInt,
        games_won -> BigInt,
        games_lost -> BigInt,
    }
}

diesel::table! {
    player_stats_doubles (player_id) {
        player_id -> Text,
        matches_played -> BigInt,
        matches_won -> BigInt,
        matches_lost -> BigInt,
        sets_won -> BigInt,
        sets_lost -> BigInt,
        games_won -> BigInt,
        games_lost -> BigInt,
    }
}

diesel::table! {
    weekly_player_stats (week_start, player_id, mode) {
        week_start -> BigInt,
        player_id -> Text,
        mode -> Text,
        matches_played -> BigInt,
        matches_won -> BigInt,
        matches_lost -> BigInt,
        sets_won -> BigInt,
        sets_lost -> BigInt,
        games_won -> BigInt,
        games_lost -> BigInt,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    players,
    matches,
    player_stats_singles,
    player_stats_doubles,
    weekly_player_stats,
);

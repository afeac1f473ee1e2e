// Reusable components live here.

pub mod detail_panel;
pub mod filter_bar;
pub mod header;
pub mod loading_spinner;
pub mod multi_select;
pub mod pagination;
pub mod stats_cards;
pub mod toast;
pub mod trends_table;

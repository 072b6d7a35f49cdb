use cafe_menu_client::{Category, MenuId};

use crate::app::App;

/// Per-row action affordances, in display order
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Affordance {
    SoldOut,
    Rename,
    Remove,
}

impl Affordance {
    pub const ALL: [Affordance; 3] = [Affordance::SoldOut, Affordance::Rename, Affordance::Remove];

    pub fn key(&self) -> char {
        match self {
            Affordance::SoldOut => 's',
            Affordance::Rename => 'e',
            Affordance::Remove => 'd',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Affordance::SoldOut => "Sold out",
            Affordance::Rename => "Rename",
            Affordance::Remove => "Remove",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuRow {
    pub id: MenuId,
    pub name: String,
    pub sold_out: bool,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTab {
    pub category: Category,
    pub active: bool,
}

/// Everything the list screen shows, derived from `App` alone
#[derive(Clone, Debug, PartialEq)]
pub struct MenuView {
    pub header: String,
    pub tabs: Vec<CategoryTab>,
    pub rows: Vec<MenuRow>,
    pub count: String,
}

impl MenuView {
    pub fn project(app: &App) -> Self {
        let active = app.active_category();

        let tabs = Category::ALL
            .into_iter()
            .map(|category| CategoryTab {
                category,
                active: category == active,
            })
            .collect();

        let rows: Vec<MenuRow> = app
            .menu
            .active_entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| MenuRow {
                id: entry.id.clone(),
                name: entry.name.clone(),
                sold_out: entry.sold_out,
                selected: i == app.selected,
            })
            .collect();

        let count = format!("Total: {}", rows.len());

        Self {
            header: app.header(),
            tabs,
            rows,
            count,
        }
    }
}

#![allow(dead_code)]

use folio_gravity::{GravityConfig, GravityOrchestrator, MemoryPage, Rect};

pub const VIEWPORT: f64 = 1280.0;
pub const PAGE_HEIGHT: f64 = 2000.0;

/// Nodes of the sample site, by role
pub struct Site {
    pub page: MemoryPage,
    pub nav_title: usize,
    pub nav_button: usize,
    pub hero: usize,
    pub intro: usize,
    pub link: usize,
    pub link_label: usize,
    pub tile: usize,
    pub photo: usize,
    pub divider: usize,
    pub footer_line: usize,
    pub hidden: usize,
}

impl Site {
    pub fn all(&self) -> Vec<usize> {
        vec![
            MemoryPage::BODY,
            self.nav_title,
            self.nav_button,
            self.hero,
            self.intro,
            self.link,
            self.link_label,
            self.tile,
            self.photo,
            self.divider,
            self.footer_line,
            self.hidden,
        ]
    }

    pub fn styles(&self) -> Vec<Option<String>> {
        self.all().into_iter().map(|n| self.page.style_of(n)).collect()
    }
}

/// A page shaped like the portfolio: nav, hero text, a link with a label,
/// a project tile with a photo, a hairline divider and a footer.
pub fn site() -> Site {
    let page = MemoryPage::new(VIEWPORT, PAGE_HEIGHT);
    let nav = page.append(MemoryPage::BODY, "nav", "fixed top-0", Rect::new(0.0, 0.0, VIEWPORT, 72.0));
    let nav_title = page.append(nav, "h1", "text-xl", Rect::new(32.0, 20.0, 180.0, 32.0));
    let nav_button = page.append(nav, "button", "", Rect::new(1100.0, 16.0, 120.0, 40.0));

    let main = page.append(MemoryPage::BODY, "main", "", Rect::new(0.0, 72.0, VIEWPORT, 1800.0));
    let hero = page.append(main, "h2", "text-6xl", Rect::new(80.0, 160.0, 900.0, 120.0));
    let intro = page.append(main, "p", "", Rect::new(80.0, 300.0, 700.0, 96.0));
    let link = page.append(main, "a", "", Rect::new(80.0, 420.0, 220.0, 48.0));
    let link_label = page.append(link, "span", "", Rect::new(96.0, 432.0, 160.0, 24.0));
    let tile = page.append(
        main,
        "div",
        "rounded-[2rem] aspect-[4/3] overflow-hidden",
        Rect::new(80.0, 520.0, 640.0, 480.0),
    );
    let photo = page.append(tile, "img", "", Rect::new(80.0, 520.0, 640.0, 480.0));
    let divider = page.append(main, "div", "w-full h-[1px] bg-black", Rect::new(80.0, 1060.0, 1120.0, 1.0));
    let hidden = page.append(main, "p", "", Rect::new(80.0, 1100.0, 400.0, 40.0));
    page.set_display(hidden, "none");

    let footer = page.append(MemoryPage::BODY, "footer", "", Rect::new(0.0, 1872.0, VIEWPORT, 128.0));
    let footer_line = page.append(footer, "p", "", Rect::new(32.0, 1900.0, 300.0, 24.0));

    page.set_initial_style(hero, Some("font-weight: 700; color: #111"));
    page.set_initial_style(link, Some("text-decoration:underline;"));
    page.set_initial_style(photo, Some("object-fit: cover;"));

    Site {
        page,
        nav_title,
        nav_button,
        hero,
        intro,
        link,
        link_label,
        tile,
        photo,
        divider,
        footer_line,
        hidden,
    }
}

pub fn orchestrator() -> GravityOrchestrator<MemoryPage> {
    GravityOrchestrator::new(GravityConfig {
        seed: Some(42),
        ..GravityConfig::default()
    })
}

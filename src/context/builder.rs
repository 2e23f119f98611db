// Priming text builder
//
// Each section renders independently; empty sections are left out and the
// rest are joined with a blank line. Output depends only on the inputs.

use crate::config::{Site, StaticContext, Team};
use crate::scrape::{DynamicData, ScrapedRoster};

pub const INSTRUCTIONS_HEADER: &str = "Contexto Importante:";
pub const FOUNDERS_LABEL: &str = "Donos da FURIA:";
pub const TITLES_HEADER: &str = "Títulos:";
pub const SITES_HEADER: &str = "Sites (você está permitido mandar os links abaixo no chat):";
pub const TEAMS_HEADER: &str = "Outros times da FURIA:";
pub const DYNAMIC_HEADER: &str = "Dados atualizados (Liquipedia):";
pub const ROSTER_LABEL: &str = "Elenco atual de CS2:";
pub const RESULTS_HEADER: &str = "Resultados recentes:";

pub const ROSTER_UNAVAILABLE: &str = "não foi possível obter o elenco atual.";
pub const RESULTS_UNAVAILABLE: &str = "não foi possível obter os resultados recentes.";
pub const DYNAMIC_UNAVAILABLE: &str =
    "Aviso: dados dinâmicos (elenco e resultados) indisponíveis no momento. Use apenas as informações acima.";

/// Accumulates rendered sections into one flat text block.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    sections: Vec<String>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(mut self, instructions: &[String]) -> Self {
        self.push_bullets(INSTRUCTIONS_HEADER, instructions.iter().map(String::as_str));
        self
    }

    pub fn founders(mut self, founders: &[String]) -> Self {
        if !founders.is_empty() {
            self.sections
                .push(format!("{} {}.", FOUNDERS_LABEL, founders.join(", ")));
        }
        self
    }

    pub fn titles(mut self, titles: &[String]) -> Self {
        self.push_bullets(TITLES_HEADER, titles.iter().map(String::as_str));
        self
    }

    pub fn sites(mut self, sites: &[Site]) -> Self {
        let lines: Vec<String> = sites
            .iter()
            .map(|site| format!("{}: {}", site.name, site.url))
            .collect();
        self.push_bullets(SITES_HEADER, lines.iter().map(String::as_str));
        self
    }

    pub fn teams(mut self, teams: &[Team]) -> Self {
        let lines: Vec<String> = teams.iter().map(render_team).collect();
        self.push_bullets(TEAMS_HEADER, lines.iter().map(String::as_str));
        self
    }

    /// Scraped data, or the unavailable warning when there is none.
    pub fn dynamic(mut self, dynamic: Option<&DynamicData>) -> Self {
        let Some(data) = dynamic else {
            self.sections.push(DYNAMIC_UNAVAILABLE.to_string());
            return self;
        };

        let mut block = vec![DYNAMIC_HEADER.to_string(), render_roster(&data.roster)];
        if data.results.is_empty() {
            block.push(format!("{} {}", RESULTS_HEADER, RESULTS_UNAVAILABLE));
        } else {
            block.push(RESULTS_HEADER.to_string());
            block.extend(data.results.iter().map(|r| format!("- {}", r)));
        }
        self.sections.push(block.join("\n"));
        self
    }

    pub fn build(self) -> String {
        let mut text = self.sections.join("\n\n");
        text.push('\n');
        text
    }

    fn push_bullets<'a>(&mut self, header: &str, items: impl Iterator<Item = &'a str>) {
        let bullets: Vec<String> = items
            .filter(|item| !item.trim().is_empty())
            .map(|item| format!("- {}", item.trim()))
            .collect();
        if bullets.is_empty() {
            return;
        }
        self.sections
            .push(format!("{}\n{}", header, bullets.join("\n")));
    }
}

fn render_team(team: &Team) -> String {
    let players = if team.players.is_empty() {
        "(sem jogadores listados)".to_string()
    } else {
        team.players.join(", ")
    };
    let mut line = format!("{}: {}.", team.label, players);
    if !team.coach.is_empty() {
        line.push_str(&format!(" Coach: {}.", team.coach.join(", ")));
    }
    line
}

fn render_roster(roster: &ScrapedRoster) -> String {
    if roster.players.is_empty() {
        return format!("{} {}", ROSTER_LABEL, ROSTER_UNAVAILABLE);
    }
    let mut line = format!("{} {}.", ROSTER_LABEL, roster.players.join(", "));
    if !roster.coach.is_empty() {
        line.push_str(&format!(" Coach: {}.", roster.coach.join(", ")));
    }
    line
}

/// Render the full priming context.
pub fn assemble(context: &StaticContext, dynamic: Option<&DynamicData>) -> String {
    ContextBuilder::new()
        .instructions(&context.instructions)
        .founders(&context.founders)
        .titles(&context.titles)
        .sites(&context.sites)
        .teams(&context.teams)
        .dynamic(dynamic)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn static_context() -> StaticContext {
        StaticContext::parse(
            r#"
instructions = ["Seja breve.", "Fale da FURIA."]
founders = ["Jaime Pádua", "André Akkari"]
acknowledgement = "Entendido!"

[[sites]]
name = "Marca"
url = "https://www.furia.gg/"

[[teams]]
key = "cs2-female"
label = "CS2 (Feminino)"
players = ["bizinha", "izaa"]
coach = ["nak"]

[[teams]]
key = "valorant"
label = "Valorant"
"#,
        )
        .unwrap()
    }

    fn dynamic(players: &[&str], results: &[&str]) -> DynamicData {
        DynamicData {
            roster: ScrapedRoster {
                players: players.iter().map(|s| s.to_string()).collect(),
                coach: vec!["sidde".to_string()],
            },
            results: results.iter().map(|s| s.to_string()).collect(),
            scraped_at: Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_static_sections_in_order() {
        let text = assemble(&static_context(), None);
        let expected_prefix = "Contexto Importante:\n- Seja breve.\n- Fale da FURIA.\n\n\
Donos da FURIA: Jaime Pádua, André Akkari.\n\n\
Sites (você está permitido mandar os links abaixo no chat):\n- Marca: https://www.furia.gg/\n\n\
Outros times da FURIA:\n- CS2 (Feminino): bizinha, izaa. Coach: nak.\n- Valorant: (sem jogadores listados).\n\n";
        assert!(text.starts_with(expected_prefix), "got:\n{}", text);
    }

    #[test]
    fn test_absent_dynamic_data_renders_single_warning() {
        let text = assemble(&static_context(), None);
        assert!(text.ends_with(&format!("{}\n", DYNAMIC_UNAVAILABLE)));
        assert!(!text.contains(DYNAMIC_HEADER));
        assert!(!text.contains(ROSTER_LABEL));
        assert!(!text.contains(RESULTS_HEADER));
    }

    #[test]
    fn test_dynamic_section() {
        let data = dynamic(
            &["FalleN", "KSCERATO"],
            &["2025-04-01 - Event: 1st (2 : 0 vs Team)"],
        );
        let text = assemble(&static_context(), Some(&data));
        assert!(text.ends_with(
            "Dados atualizados (Liquipedia):\n\
Elenco atual de CS2: FalleN, KSCERATO. Coach: sidde.\n\
Resultados recentes:\n\
- 2025-04-01 - Event: 1st (2 : 0 vs Team)\n"
        ));
        assert!(!text.contains(DYNAMIC_UNAVAILABLE));
    }

    #[test]
    fn test_partial_dynamic_placeholders() {
        let data = dynamic(&[], &[]);
        let text = assemble(&static_context(), Some(&data));
        assert!(text.contains(&format!("{} {}", ROSTER_LABEL, ROSTER_UNAVAILABLE)));
        assert!(text.contains(&format!("{} {}", RESULTS_HEADER, RESULTS_UNAVAILABLE)));
        assert!(!text.contains(DYNAMIC_UNAVAILABLE));
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let context = static_context();
        let data = dynamic(&["FalleN"], &["r1", "r2"]);
        assert_eq!(
            assemble(&context, Some(&data)),
            assemble(&context, Some(&data))
        );
        assert_eq!(assemble(&context, None), assemble(&context, None));
    }

    #[test]
    fn test_empty_optional_sections_are_omitted() {
        let context = StaticContext::parse(
            r#"
instructions = ["a"]
acknowledgement = "ok"
"#,
        )
        .unwrap();
        let text = assemble(&context, None);
        assert!(!text.contains(FOUNDERS_LABEL));
        assert!(!text.contains(TITLES_HEADER));
        assert!(!text.contains(SITES_HEADER));
        assert!(!text.contains(TEAMS_HEADER));
        assert_eq!(
            text,
            format!("{}\n- a\n\n{}\n", INSTRUCTIONS_HEADER, DYNAMIC_UNAVAILABLE)
        );
    }

    #[test]
    fn test_builtin_context_assembles() {
        let context = StaticContext::load(None).unwrap();
        let text = assemble(&context, None);
        assert!(text.contains("https://www.furia.gg/"));
        assert!(text.contains(TITLES_HEADER));
    }
}

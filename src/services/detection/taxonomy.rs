// Pattern Taxonomy
// Stylistic markers typical of machine-generated Portuguese prose

use crate::models::PatternCategory;

/// How a pattern is located in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Literal substring, case-insensitive.
    Phrase,
    /// Whole word only, case-insensitive.
    Word,
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryRules {
    pub category: PatternCategory,
    pub mode: MatchMode,
    pub justification: &'static str,
    /// Context snippet radius, in chars on each side of a match.
    pub context_chars: usize,
    pub patterns: &'static [&'static str],
}

pub const FORMAL_EXPRESSIONS: &[&str] = &[
    "é importante destacar",
    "convém ressaltar",
    "considerando os fatores",
    "pode-se inferir",
    "é fundamental observar",
    "observa-se que",
    "conclui-se que",
    "de maneira clara e objetiva",
    "abordagem sistemática",
    "o presente estudo",
    "de acordo com",
    "vale ressaltar",
    "verifica-se que",
    "cabe salientar",
    "é pertinente mencionar",
    "pressupõe-se que",
];

pub const COMPLEX_CONNECTIVES: &[&str] = &[
    "portanto",
    "consequentemente",
    "adicionalmente",
    "notavelmente",
    "consideravelmente",
    "significativamente",
    "efetivamente",
];

pub const PASSIVE_STRUCTURES: &[&str] = &[
    "é realizado",
    "é observado",
    "é verificado",
    "é constatado",
    "é possível identificar",
    "pode ser observado",
    "deve ser considerado",
];

pub const SUPERLATIVES: &[&str] = &[
    "extremamente",
    "altamente",
    "profundamente",
    "intensamente",
    "significativamente",
    "consideravelmente",
    "notavelmente",
];

/// The full taxonomy, in scan order.
pub static TAXONOMY: [CategoryRules; 4] = [
    CategoryRules {
        category: PatternCategory::FormalExpression,
        mode: MatchMode::Phrase,
        justification: "Expressão excessivamente formal comum em textos de IA",
        context_chars: 50,
        patterns: FORMAL_EXPRESSIONS,
    },
    CategoryRules {
        category: PatternCategory::ComplexConnective,
        mode: MatchMode::Word,
        justification: "Uso frequente de conectivos complexos típico de IA",
        context_chars: 30,
        patterns: COMPLEX_CONNECTIVES,
    },
    CategoryRules {
        category: PatternCategory::PassiveVoice,
        mode: MatchMode::Phrase,
        justification: "Uso excessivo de voz passiva, comum em textos formais de IA",
        context_chars: 40,
        patterns: PASSIVE_STRUCTURES,
    },
    CategoryRules {
        category: PatternCategory::Superlative,
        mode: MatchMode::Word,
        justification: "Uso frequente de intensificadores e superlativos",
        context_chars: 25,
        patterns: SUPERLATIVES,
    },
];

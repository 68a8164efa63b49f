// Seed Corpus
// Hand-written labelled examples used when no trained model is persisted

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authorship {
    Human,
    Machine,
}

impl Authorship {
    /// Class index: 0 = human, 1 = machine.
    pub fn class(&self) -> u8 {
        match self {
            Self::Human => 0,
            Self::Machine => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSample {
    pub text: String,
    pub label: Authorship,
}

impl TrainingSample {
    pub fn new(text: impl Into<String>, label: Authorship) -> Self {
        Self { text: text.into(), label }
    }
}

const HUMAN_TEXTS: &[&str] = &[
    "Fui na padaria e comprei pão. O padeiro foi muito simpático!",
    "Não acredito que esqueci minha carteira em casa. Que chato!",
    "Meu time ganhou o jogo de virada. Foi emocionante demais!",
    "Estou com uma fome danada. Vou pedir uma pizza bem grande.",
    "O trânsito hoje estava impossível. Levei duas horas pra chegar.",
];

const MACHINE_TEXTS: &[&str] = &[
    "É importante destacar que a eficácia do processo depende de diversos fatores inter-relacionados.",
    "Considerando os aspectos mencionados anteriormente, pode-se concluir que a abordagem é adequada.",
    "Observa-se que a implementação das estratégias resulta em benefícios significativos.",
    "Convém ressaltar que a metodologia utilizada segue os padrões estabelecidos.",
    "Conclui-se que a proposta apresenta viabilidade técnica e operacional.",
];

/// Human examples first, then machine examples.
pub fn seed_samples() -> Vec<TrainingSample> {
    HUMAN_TEXTS
        .iter()
        .map(|t| TrainingSample::new(*t, Authorship::Human))
        .chain(
            MACHINE_TEXTS
                .iter()
                .map(|t| TrainingSample::new(*t, Authorship::Machine)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_corpus_is_balanced() {
        let samples = seed_samples();
        assert_eq!(samples.len(), 10);
        let machine = samples.iter().filter(|s| s.label == Authorship::Machine).count();
        assert_eq!(machine, 5);
        assert_eq!(samples[0].label.class(), 0);
        assert_eq!(samples[9].label.class(), 1);
    }
}

//! Eye-health tips shown in break prompts.

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    /// Resolves a locale tag such as `es-MX` or `en_US.UTF-8`. Unknown
    /// languages fall back to English.
    pub fn from_locale(tag: &str) -> Self {
        let base = tag.split(['-', '_', '.']).next().unwrap_or_default().to_lowercase();
        match base.as_str() {
            "es" => Language::Es,
            _ => Language::En,
        }
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_locale(s))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Es => write!(f, "es"),
        }
    }
}

struct Tip {
    en: &'static str,
    es: &'static str,
}

impl Tip {
    fn text(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Es => self.es,
        }
    }
}

const TIPS: &[Tip] = &[
    // distance focus
    Tip {
        en: "Look at something 20 feet (6 meters) away for 20 seconds to relax your eye muscles.",
        es: "Mira algo a 6 metros de distancia durante 20 segundos para relajar los musculos oculares.",
    },
    Tip {
        en: "Focus on a distant object through a window. Let your eyes rest from the screen.",
        es: "Enfoca un objeto lejano a traves de una ventana. Deja que tus ojos descansen de la pantalla.",
    },
    Tip {
        en: "Find something far away to look at. Your eyes need a break from close-up focus.",
        es: "Busca algo lejano para mirar. Tus ojos necesitan un descanso del enfoque cercano.",
    },
    // blinking
    Tip {
        en: "Blink slowly 10 times to refresh your eyes and spread natural tears.",
        es: "Parpadea lentamente 10 veces para refrescar tus ojos y distribuir las lagrimas naturales.",
    },
    Tip {
        en: "We blink less when using screens. Take a moment to blink consciously several times.",
        es: "Parpadeamos menos al usar pantallas. Toma un momento para parpadear conscientemente varias veces.",
    },
    // relaxation
    Tip {
        en: "Close your eyes gently for 20 seconds. Let the darkness soothe your vision.",
        es: "Cierra los ojos suavemente durante 20 segundos. Deja que la oscuridad calme tu vision.",
    },
    Tip {
        en: "Cover your closed eyes with your palms. Feel the warmth relax your eye muscles.",
        es: "Cubre tus ojos cerrados con las palmas. Siente como el calor relaja los musculos oculares.",
    },
    Tip {
        en: "Roll your eyes slowly in circles, then reverse direction.",
        es: "Gira los ojos lentamente en circulos, luego invierte la direccion.",
    },
    // stretching
    Tip {
        en: "Stretch your neck by gently tilting your head to each side.",
        es: "Estira el cuello inclinando suavemente la cabeza a cada lado.",
    },
    Tip {
        en: "Roll your shoulders back and down. Good posture supports healthy vision.",
        es: "Gira los hombros hacia atras y abajo. Una buena postura apoya una vision saludable.",
    },
    Tip {
        en: "Stand up and stretch your whole body. Movement helps blood flow to your eyes.",
        es: "Levantate y estira todo el cuerpo. El movimiento ayuda al flujo sanguineo hacia los ojos.",
    },
    // hydration
    Tip {
        en: "Take a sip of water. Staying hydrated helps prevent dry eyes.",
        es: "Toma un sorbo de agua. Mantenerse hidratado ayuda a prevenir los ojos secos.",
    },
    Tip {
        en: "Drink some water and give your eyes a rest.",
        es: "Bebe agua y dale un descanso a tus ojos.",
    },
    // breathing
    Tip {
        en: "Take three deep breaths. Relaxation reduces eye strain from stress.",
        es: "Toma tres respiraciones profundas. La relajacion reduce la fatiga ocular por estres.",
    },
    Tip {
        en: "Look away from the screen and simply breathe.",
        es: "Aparta la mirada de la pantalla y simplemente respira.",
    },
];

/// Content of a break prompt: the message and the labels of its two choices.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct BreakPrompt {
    pub message: String,
    pub dismiss_label: String,
    pub snooze_label: String,
}

impl BreakPrompt {
    /// Builds a prompt around a random tip.
    pub fn random(language: Language) -> Self {
        Self::with_tip(language, random_tip(language))
    }

    pub fn with_tip(language: Language, tip: &str) -> Self {
        let (title, dismiss, snooze) = match language {
            Language::En => ("Eye Break", "Dismiss", "Snooze 5 min"),
            Language::Es => ("Descanso para los ojos", "Descartar", "Posponer 5 min"),
        };
        Self {
            message: format!("{}: {}", title, tip),
            dismiss_label: dismiss.to_string(),
            snooze_label: snooze.to_string(),
        }
    }
}

/// Picks a random tip in `language`.
pub fn random_tip(language: Language) -> &'static str {
    TIPS.choose(&mut rand::rng()).map(|tip| tip.text(language)).unwrap_or_default()
}

pub fn all_tips(language: Language) -> Vec<&'static str> {
    TIPS.iter().map(|tip| tip.text(language)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_tags_resolve_to_base_language() {
        assert_eq!(Language::from_locale("es-MX"), Language::Es);
        assert_eq!(Language::from_locale("ES"), Language::Es);
        assert_eq!(Language::from_locale("en_US.UTF-8"), Language::En);
        assert_eq!(Language::from_locale("fr"), Language::En);
    }

    #[test]
    fn random_tip_comes_from_the_requested_language() {
        let spanish = all_tips(Language::Es);
        for _ in 0..20 {
            assert!(spanish.contains(&random_tip(Language::Es)));
        }
    }

    #[test]
    fn prompt_is_localized() {
        let prompt = BreakPrompt::with_tip(Language::Es, "Respira.");
        assert_eq!(prompt.message, "Descanso para los ojos: Respira.");
        assert_eq!(prompt.dismiss_label, "Descartar");
        assert_eq!(prompt.snooze_label, "Posponer 5 min");
    }
}

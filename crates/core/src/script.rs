use serde::{Deserialize, Serialize};

use crate::error::{Result, ScriptError};

/// One (user prompt, bot response) pair within a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Pre-authored user prompt, seeded into the input composer
    pub prompt: String,
    /// Pre-authored bot response delivered after the typing delay
    pub response: String,
}

impl Turn {
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), response: response.into() }
    }
}

/// One fixed multi-turn fact-check conversation with a citation URL
///
/// Scripts are immutable and identified by position in the library.
/// All turns in a script share the same source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Short identifier shown in the header and CLI listings
    pub title: String,
    /// Ordered conversation turns
    pub turns: Vec<Turn>,
    /// Citation URL backing every response in this script
    pub source_url: String,
}

impl Script {
    pub fn new(title: impl Into<String>, turns: Vec<Turn>, source_url: impl Into<String>) -> Self {
        Self { title: title.into(), turns, source_url: source_url.into() }
    }

    /// Number of turns in this script
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Get a turn by cursor position
    pub fn turn(&self, cursor: usize) -> Option<&Turn> {
        self.turns.get(cursor)
    }

    /// Prompt of the first turn (seeded when the script becomes active)
    pub fn opening_prompt(&self) -> &str {
        self.turns.first().map(|t| t.prompt.as_str()).unwrap_or_default()
    }
}

/// Ordered, compiled-in library of scripts
///
/// The player cycles through the library in order, wrapping around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLibrary {
    scripts: Vec<Script>,
}

impl ScriptLibrary {
    /// Build a library from a non-empty list of validated scripts
    pub fn new(scripts: Vec<Script>) -> Result<Self> {
        if scripts.is_empty() {
            return Err(ScriptError::EmptyLibrary.into());
        }
        for script in &scripts {
            if script.turns.is_empty() {
                return Err(ScriptError::EmptyScript(script.title.clone()).into());
            }
        }
        Ok(Self { scripts })
    }

    /// The built-in demonstration library: two fact-check conversations
    pub fn builtin() -> Self {
        let scripts = vec![
            Script::new(
                "chuva-de-peixes",
                vec![
                    Turn::new(
                        "Chuva de peixes em ruas na cidade de Santa Maria, RS por conta de alagamentos.",
                        "É fake: a notícia falsa é acompanhada de imagens de peixes espalhados pela calçada e \
                         pela rua, sendo falsamente atribuídas à crise climática no Rio Grande do Sul. Porém, \
                         as imagens aparecem em publicações desde 2015, anos antes do evento.",
                    ),
                    Turn::new(
                        "As imagens que aparecem em 2015 são verdadeiras?",
                        "Não é possível confirmar se as imagens dos peixes nas calçadas são verdadeiras, mas \
                         portais de checagem identificaram que elas já foram usadas para espalhar desinformação \
                         em 2019. Uma das imagens inclui um carro cuja placa indica que a foto foi tirada na Índia.",
                    ),
                ],
                "https://oglobo.globo.com/fato-ou-fake/noticia/2024/05/16/e-fake-que-cidade-gaucha-tenha-registrado-chuva-de-peixes-durante-enchentes-no-rio-grande-do-sul.ghtml",
            ),
            Script::new(
                "veneza-inundada",
                vec![
                    Turn::new(
                        "É verdade que Veneza corre o risco de ser permanentemente inundada?",
                        "Sim, Veneza corre risco de ser permanentemente inundada. A cidade enfrenta há anos \
                         desafios devido à elevação do nível do mar e ao afundamento gradual do solo (fenômeno \
                         conhecido como subsidence). De acordo com especialistas, Veneza está afundando de 1 a \
                         2 milímetros por ano. Além disso, o aumento do nível do mar devido às mudanças \
                         climáticas coloca a cidade sob maior risco, pois marés altas, chamadas acqua alta, têm \
                         se tornado mais frequentes e intensas.",
                    ),
                    Turn::new(
                        "Há algo sendo feito para evitar isso?",
                        "Para mitigar esses riscos, foi implementado o projeto MOSE (Modulo Sperimentale \
                         Elettromeccanico), um sistema de barreiras móveis projetado para proteger Veneza de \
                         inundações. Esse sistema é composto por diques móveis que se elevam quando as marés \
                         são altas para bloquear a água. No entanto, mesmo com o MOSE, há preocupações sobre \
                         sua durabilidade a longo prazo e os impactos do aquecimento global, que podem elevar \
                         o nível do mar além do que o sistema é capaz de suportar.",
                    ),
                ],
                "https://habitability.com.br/projeto-mose/",
            ),
        ];

        // Built-in table is validated by the tests below; construction cannot fail.
        Self { scripts }
    }

    /// Number of scripts in the library
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Get a script by index
    pub fn get(&self, index: usize) -> Result<&Script> {
        self.scripts
            .get(index)
            .ok_or_else(|| ScriptError::IndexOutOfRange { index, len: self.scripts.len() }.into())
    }

    /// All scripts, in library order
    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    /// Index of the script after `index`, wrapping around
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.scripts.len()
    }
}

impl Default for ScriptLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

// src/generator/catalog.rs

//! Built-in content used for seeding and whenever generation is unavailable.

use crate::models::{
    challenge::NewChallenge,
    content::{NewArticle, NewCollectionPoint, SeedContent},
    quiz::NewQuizQuestion,
};

const FIXED_CHALLENGES: &[(&str, i32)] = &[
    ("Reutilize uma embalagem ao invés de descartá-la", 5),
    ("Caminhe ou use bicicleta para uma viagem curta", 8),
    ("Apague todas as luzes desnecessárias em casa", 6),
    ("Separe o lixo reciclável por uma semana", 10),
    ("Use uma garrafa reutilizável ao invés de comprar água", 7),
    ("Colete lixo em um espaço público", 12),
    ("Desligue aparelhos eletrônicos quando não estiver usando", 6),
    ("Faça uma refeição sem carne hoje", 8),
];

const FALLBACK_CHALLENGES: &[(&str, i32)] = &[
    ("Substitua uma refeição por uma opção mais sustentável hoje", 8),
    ("Use transporte público ou bicicleta em vez do carro", 10),
    ("Evite usar produtos descartáveis por um dia inteiro", 12),
    ("Plante uma semente ou cuide de uma planta", 6),
    ("Desligue aparelhos eletrônicos da tomada quando não estiver usando", 5),
    ("Faça uma composteira caseira com restos orgânicos", 9),
    ("Reduza o tempo do banho em pelo menos 2 minutos", 7),
    ("Use sacolas reutilizáveis para todas as compras", 6),
    ("Conserte algo quebrado ao invés de jogar fora", 11),
    ("Doe roupas ou objetos que não usa mais", 8),
];

/// (question, options, index of the correct option)
const QUESTION_POOL: &[(&str, [&str; 4], i32)] = &[
    (
        "Qual é o principal gás responsável pelo efeito estufa?",
        ["Oxigênio", "Dióxido de Carbono", "Nitrogênio", "Hidrogênio"],
        1,
    ),
    (
        "Quantos anos uma garrafa PET leva para se degradar?",
        ["50 anos", "100 anos", "400 anos", "1000 anos"],
        2,
    ),
    (
        "Qual cor de lixeira é destinada ao vidro na coleta seletiva?",
        ["Verde", "Azul", "Amarelo", "Vermelho"],
        0,
    ),
    (
        "Qual é a principal fonte de energia renovável no Brasil?",
        ["Energia solar", "Energia hidrelétrica", "Energia eólica", "Energia nuclear"],
        1,
    ),
    (
        "Quanto tempo leva para uma sacola plástica se degradar no meio ambiente?",
        ["1-2 anos", "10-20 anos", "100-400 anos", "1000+ anos"],
        2,
    ),
    (
        "Qual prática NÃO contribui para a redução do consumo de água?",
        [
            "Tomar banhos mais curtos",
            "Consertar vazamentos",
            "Deixar a torneira aberta ao escovar os dentes",
            "Usar máquina de lavar com carga completa",
        ],
        2,
    ),
    (
        "O que significa a sigla 'CO2' no contexto ambiental?",
        ["Carbono e Oxigênio", "Dióxido de Carbono", "Monóxido de Carbono", "Carbono Orgânico"],
        1,
    ),
    (
        "Qual é a melhor forma de descartar pilhas e baterias?",
        ["Lixo comum", "Lixo reciclável", "Pontos de coleta específicos", "Enterrar no quintal"],
        2,
    ),
    (
        "Qual material demora MAIS tempo para se degradar na natureza?",
        ["Papel", "Vidro", "Casca de banana", "Folhas"],
        1,
    ),
    (
        "Qual cor de lixeira é destinada ao papel na coleta seletiva?",
        ["Verde", "Azul", "Amarelo", "Vermelho"],
        1,
    ),
    (
        "Qual dessas ações contribui MAIS para reduzir a pegada de carbono?",
        ["Reciclar papel", "Usar transporte público", "Desligar as luzes", "Plantar uma árvore"],
        1,
    ),
    (
        "Quantos litros de água são necessários para produzir 1kg de carne bovina?",
        ["500 litros", "2.000 litros", "15.000 litros", "50.000 litros"],
        2,
    ),
    (
        "Qual é o protocolo internacional mais importante sobre mudanças climáticas?",
        ["Protocolo de Kyoto", "Acordo de Paris", "Protocolo de Montreal", "Agenda 2030"],
        1,
    ),
    (
        "Qual tipo de lâmpada consome MENOS energia?",
        ["Incandescente", "Fluorescente", "LED", "Halógena"],
        2,
    ),
    (
        "O que é compostagem?",
        [
            "Queima de lixo orgânico",
            "Decomposição natural de resíduos orgânicos",
            "Reciclagem de plásticos",
            "Tratamento de água",
        ],
        1,
    ),
    (
        "Qual gás é principalmente responsável pela destruição da camada de ozônio?",
        ["CO2", "CFC", "CH4", "N2O"],
        1,
    ),
    (
        "Qual a porcentagem da superfície terrestre coberta por água?",
        ["50%", "60%", "71%", "80%"],
        2,
    ),
    (
        "Qual dessas opções é uma fonte de energia NÃO renovável?",
        ["Energia solar", "Energia eólica", "Carvão mineral", "Energia hidrelétrica"],
        2,
    ),
    (
        "Quantos anos uma lata de alumínio leva para se degradar?",
        ["10 anos", "50 anos", "200 anos", "500 anos"],
        3,
    ),
    (
        "Qual é o maior produtor de lixo eletrônico per capita do mundo?",
        ["China", "Estados Unidos", "Noruega", "Brasil"],
        2,
    ),
];

const POOL_QUESTION_POINTS: i32 = 10;

const DAILY_PHRASES: &[&str] = &[
    "Pequenas atitudes, repetidas todos os dias, mudam o planeta.",
    "O melhor resíduo é aquele que não é gerado.",
    "Reduzir, reutilizar e reciclar: nessa ordem.",
    "Cada garrafa reutilizada é uma garrafa a menos no oceano.",
    "A natureza não precisa de nós; nós precisamos dela.",
    "Economizar água hoje é garantir água amanhã.",
    "Quem separa o lixo ajuda quem vive da reciclagem.",
];

const ARTICLES: &[(&str, &str)] = &[
    (
        "Como separar o lixo em casa",
        "Um guia rápido das cores da coleta seletiva e do que pode ou não ser reciclado.",
    ),
    (
        "Compostagem doméstica para iniciantes",
        "Transforme restos de frutas e verduras em adubo usando um balde e um pouco de paciência.",
    ),
    (
        "Por que descartar pilhas corretamente",
        "Metais pesados contaminam solo e água; saiba onde entregar pilhas e baterias usadas.",
    ),
];

const COLLECTION_POINTS: &[(&str, &str, &[&str])] = &[
    (
        "Ecoponto Centro",
        "Rua das Flores, 120 - Centro",
        &["Papel", "Plástico", "Metal", "Vidro"],
    ),
    (
        "Cooperativa Recicla Mais",
        "Avenida Brasil, 2450 - Jardim América",
        &["Papel", "Papelão", "Plástico"],
    ),
    (
        "Posto de Coleta de Eletrônicos",
        "Rua Sete de Setembro, 88 - Vila Nova",
        &["Eletrônicos", "Pilhas", "Baterias"],
    ),
    (
        "Ponto de Entrega de Óleo",
        "Praça da Matriz, s/n - Centro",
        &["Óleo de cozinha"],
    ),
];

pub fn fixed_challenges() -> Vec<NewChallenge> {
    FIXED_CHALLENGES
        .iter()
        .map(|(text, points)| NewChallenge {
            challenge: text.to_string(),
            is_fixed: true,
            points: *points,
        })
        .collect()
}

/// Candidate pool for "generate challenges" when no generator is available.
pub fn fallback_challenges() -> Vec<NewChallenge> {
    FALLBACK_CHALLENGES
        .iter()
        .map(|(text, points)| NewChallenge {
            challenge: text.to_string(),
            is_fixed: false,
            points: *points,
        })
        .collect()
}

/// Candidate pool for seeding and for "generate quiz questions" fallbacks.
pub fn question_pool() -> Vec<NewQuizQuestion> {
    QUESTION_POOL
        .iter()
        .map(|(question, options, correct_answer)| NewQuizQuestion {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: *correct_answer,
            points: POOL_QUESTION_POINTS,
        })
        .collect()
}

/// Everything `/api/seed-data` inserts; `questions` is already sampled down.
pub fn seed_content(questions: Vec<NewQuizQuestion>) -> SeedContent {
    SeedContent {
        challenges: fixed_challenges(),
        questions,
        phrases: DAILY_PHRASES.iter().map(|p| p.to_string()).collect(),
        articles: ARTICLES
            .iter()
            .map(|(title, description)| NewArticle {
                title: title.to_string(),
                description: description.to_string(),
                image: None,
            })
            .collect(),
        collection_points: COLLECTION_POINTS
            .iter()
            .map(|(name, address, waste_types)| NewCollectionPoint {
                name: name.to_string(),
                address: address.to_string(),
                waste_types: waste_types.iter().map(|w| w.to_string()).collect(),
            })
            .collect(),
    }
}

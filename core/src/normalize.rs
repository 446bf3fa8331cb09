use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref NON_LETTER: Regex = Regex::new(r"[^a-z\s]").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = ENGLISH_STOP_WORDS.iter().copied().collect();
}

/// Tokens shorter than this never enter the vocabulary.
const MIN_TOKEN_LEN: usize = 2;

pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a","about","above","across","after","afterwards","again","against","all","almost","alone","along","already","also","although","always","am","among","amongst","amoungst","amount","an","and","another","any","anyhow","anyone","anything","anyway","anywhere","are","around","as","at",
    "back","be","became","because","become","becomes","becoming","been","before","beforehand","behind","being","below","beside","besides","between","beyond","bill","both","bottom","but","by",
    "call","can","cannot","cant","co","con","could","couldnt","cry",
    "de","describe","detail","do","done","down","due","during",
    "each","eg","eight","either","eleven","else","elsewhere","empty","enough","etc","even","ever","every","everyone","everything","everywhere","except",
    "few","fifteen","fifty","fill","find","fire","first","five","for","former","formerly","forty","found","four","from","front","full","further",
    "get","give","go",
    "had","has","hasnt","have","he","hence","her","here","hereafter","hereby","herein","hereupon","hers","herself","him","himself","his","how","however","hundred",
    "i","ie","if","in","inc","indeed","interest","into","is","it","its","itself",
    "keep","last","latter","latterly","least","less","ltd",
    "made","many","may","me","meanwhile","might","mill","mine","more","moreover","most","mostly","move","much","must","my","myself",
    "name","namely","neither","never","nevertheless","next","nine","no","nobody","none","noone","nor","not","nothing","now","nowhere",
    "of","off","often","on","once","one","only","onto","or","other","others","otherwise","our","ours","ourselves","out","over","own",
    "part","per","perhaps","please","put","rather","re",
    "same","see","seem","seemed","seeming","seems","serious","several","she","should","show","side","since","sincere","six","sixty","so","some","somehow","someone","something","sometime","sometimes","somewhere","still","such","system",
    "take","ten","than","that","the","their","them","themselves","then","thence","there","thereafter","thereby","therefore","therein","thereupon","these","they","thick","thin","third","this","those","though","three","through","throughout","thru","thus","to","together","too","top","toward","towards","twelve","twenty","two",
    "un","under","until","up","upon","us",
    "very","via",
    "was","we","well","were","what","whatever","when","whence","whenever","where","whereafter","whereas","whereby","wherein","whereupon","wherever","whether","which","while","whither","who","whoever","whole","whom","whose","why","will","with","within","without","would",
    "yet","you","your","yours","yourself","yourselves",
];

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Lowercase, replace anything that is not an ASCII letter or whitespace with a
/// space, collapse whitespace runs and trim. Idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_LETTER.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

pub fn normalize_corpus<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    texts.iter().map(|t| normalize(t.as_ref())).collect()
}

/// Split text into vocabulary terms: normalized words of at least two letters,
/// optionally without stop words, expanded into every n-gram size in `ngram_range`.
pub fn analyze(text: &str, ngram_range: (usize, usize), stop_words: bool) -> Vec<String> {
    let normalized = normalize(text);
    let words: Vec<&str> = normalized
        .split_whitespace()
        .filter(|w| w.len() >= MIN_TOKEN_LEN)
        .filter(|w| !stop_words || !is_stopword(w))
        .collect();

    let (min_n, max_n) = ngram_range;
    let mut terms = Vec::new();
    for n in min_n.max(1)..=max_n {
        if n > words.len() { break; }
        for window in words.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

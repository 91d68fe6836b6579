//! Name pools drawn from when generating players and teams

pub(super) const FIRST_NAMES: &[&str] = &[
    "Adrian", "Alberto", "Alex", "Andre", "Antonio", "Bruno", "Carlos", "Cristian", "Daniel",
    "David", "Diego", "Eduardo", "Emil", "Enzo", "Fabio", "Felix", "Filip", "Gabriel", "Hugo",
    "Ivan", "Jakub", "James", "Javier", "Jonas", "Jorge", "Julian", "Kevin", "Leon", "Luca",
    "Lucas", "Luis", "Marco", "Mario", "Mateo", "Matteo", "Max", "Miguel", "Nicolas", "Oliver",
    "Oscar", "Pablo", "Paolo", "Pedro", "Rafael", "Ricardo", "Samuel", "Sergio", "Thomas",
    "Tiago", "Victor",
];

pub(super) const SURNAMES: &[&str] = &[
    "Almeida", "Bauer", "Bianchi", "Costa", "Dubois", "Fernandez", "Ferrari", "Fischer",
    "Garcia", "Gomez", "Hansen", "Hoffmann", "Jansen", "Kowalski", "Lambert", "Lopez", "Martin",
    "Martinez", "Meyer", "Moreau", "Muller", "Nielsen", "Novak", "Pereira", "Petrov", "Ricci",
    "Rodriguez", "Romano", "Rossi", "Santos", "Schmidt", "Silva", "Smith", "Sousa", "Taylor",
    "Torres", "Varga", "Weber", "Wilson", "Zanetti",
];

pub(super) const COUNTRIES: &[&str] = &[
    "Argentina", "Belgium", "Brazil", "Croatia", "Denmark", "England", "France", "Germany",
    "Italy", "Netherlands", "Poland", "Portugal", "Spain", "Sweden", "Uruguay",
];
